use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;

use bmitrack_api::routes;
use bmitrack_db::connection::Connection;
use bmitrack_db::measurement::MeasurementRepositoryImpl;
use bmitrack_db::user::UserRepositoryImpl;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();

    info!("Connecting to database");
    let conn = Connection::establish().await.unwrap();
    let user_repository = UserRepositoryImpl::new(conn.clone());
    let measurement_repository = MeasurementRepositoryImpl::new(conn);

    info!("Starting server on 127.0.0.1:8080");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(user_repository.clone()))
            .app_data(web::Data::new(measurement_repository.clone()))
            .configure(routes::configure)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
