/// Database model definitions.
pub mod models;
/// Storage abstraction layer for database operations.
pub mod storage;
/// User account and game record storage backends.
pub mod user_store;
