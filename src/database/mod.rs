use thiserror::Error;

pub mod db;
pub mod db_structs;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("Unexpected value {value} in column {column}")]
    InvalidColumn { column: &'static str, value: i32 },

    #[error("Event {0} not found")]
    EventNotFound(i32)
}
