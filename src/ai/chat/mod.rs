pub mod connection;
pub mod core;
pub mod models;
pub mod session;

pub use self::connection::{Connection, validate};
pub use self::core::{compose, fetch_response};
pub use models::{History, Language, Model, Turn};
pub use session::Session;
