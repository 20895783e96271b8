//! Business logic services.

pub mod access;
pub mod accounts;
pub mod flash;

pub use access::{can_create_blog, require_author};
