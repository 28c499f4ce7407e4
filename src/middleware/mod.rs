pub mod auth;
pub mod json_body;
pub mod query;

pub use auth::{SESSION_COOKIE, SessionContext};
pub use json_body::TutorJson;
pub use query::TutorQuery;
