use std::{env, sync::Arc};

use dotenv::dotenv;
use sqlx::{Connection as SqlxConnection, Executor, SqliteConnection};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::Error;
use crate::schema;

const DEFAULT_DATABASE_URL: &str = "sqlite:bmi_data.db?mode=rwc";

const SETUP_QUERY: &str = "PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = ON;";

#[derive(Clone)]
pub struct Connection {
    inner: Arc<Mutex<SqliteConnection>>,
}

impl Connection {
    /// Connect using `DATABASE_URL` from the environment (or `.env`),
    /// falling back to the local `bmi_data.db` file.
    pub async fn establish() -> Result<Self, Error> {
        dotenv().ok();
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());
        Self::establish_with_url(&database_url).await
    }

    /// Connect to a specific database URL, applying session pragmas and
    /// the idempotent schema setup.
    pub async fn establish_with_url(database_url: &str) -> Result<Self, Error> {
        let mut connection = SqliteConnection::connect(database_url).await?;

        connection.execute(SETUP_QUERY).await?;
        schema::apply(&mut connection).await?;

        Ok(Self {
            inner: Arc::new(Mutex::new(connection)),
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.inner.lock().await
    }
}
