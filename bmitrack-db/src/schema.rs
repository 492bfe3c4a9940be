use sqlx::{Executor, SqliteConnection};

/// Both tables are created on first use; `date` holds an ISO-8601 text
/// timestamp so the trend query can order lexicographically.
const CREATE_TABLES_QUERY: &str = "CREATE TABLE IF NOT EXISTS users(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS bmi_records(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    weight REAL NOT NULL,
    height REAL NOT NULL,
    bmi REAL NOT NULL,
    category TEXT NOT NULL,
    date TEXT NOT NULL
);";

pub async fn apply(connection: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    connection.execute(CREATE_TABLES_QUERY).await?;
    Ok(())
}
