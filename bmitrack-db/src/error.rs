#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("user \"{0}\" already exists")]
    UserAlreadyExists(String),

    #[error("malformed record in store: {0}")]
    MalformedRecord(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
