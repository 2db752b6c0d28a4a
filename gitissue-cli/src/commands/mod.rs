//! CLI command implementations

pub mod auth;
pub mod issue;
pub mod search;

pub use auth::AuthArgs;
pub use issue::{CreateArgs, EditArgs, GetArgs};
pub use search::SearchArgs;
