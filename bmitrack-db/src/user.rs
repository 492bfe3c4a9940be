use async_trait::async_trait;
use log::debug;
use sqlx::FromRow;

use bmitrack_model::user::User;

use crate::connection::Connection;
use crate::error::Error;

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
        }
    }
}

#[mockall::automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, name: &str) -> Result<User, Error>;
    async fn list_users(&self) -> Result<Vec<User>, Error>;
    async fn find_user(&self, name: &str) -> Result<Option<User>, Error>;
}

#[derive(Clone)]
pub struct UserRepositoryImpl {
    connection: Connection,
}

impl UserRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create_user(&self, name: &str) -> Result<User, Error> {
        debug!("Inserting user {}", name);
        let mut conn = self.connection.lock().await;
        let result = sqlx::query("INSERT INTO users(name) VALUES (?)")
            .bind(name)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_insert_error(name, e))?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: name.to_owned(),
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let mut conn = self.connection.lock().await;
        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name FROM users ORDER BY name")
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_user(&self, name: &str) -> Result<Option<User>, Error> {
        let mut conn = self.connection.lock().await;
        let row = sqlx::query_as::<_, UserRow>("SELECT id, name FROM users WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.map(User::from))
    }
}

fn map_insert_error(name: &str, e: sqlx::Error) -> Error {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::UserAlreadyExists(name.to_owned())
        }
        other => Error::Sqlx(other),
    }
}
