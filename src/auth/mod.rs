//! Authentication: password hashing, session tokens and the login gate.

mod extractor;
pub mod password;
pub mod session;

pub use extractor::{CurrentUser, LOGIN_PATH, LoginRequired};
pub use session::{SESSION_COOKIE, SessionClaims};
