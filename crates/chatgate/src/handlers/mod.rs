//! HTTP request handlers.

mod chat;
mod health;
mod models;
mod version;

pub use chat::chat;
pub use health::{livez, readyz};
pub use models::list_models;
pub use version::version;
