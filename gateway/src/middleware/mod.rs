pub mod session;

pub use session::{require_token, resolve_identity, SessionToken, SESSION_COOKIE};
