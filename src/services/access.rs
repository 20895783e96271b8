//! Author-only gate for publishing.

use crate::entity::profile;
use crate::error::{AppError, AppResult};

/// Message shown when a reader tries to publish.
pub const AUTHORS_ONLY_MESSAGE: &str = "Only authors can create blogs";

/// Whether the profile may publish blogs.
pub fn can_create_blog(profile: &profile::Model) -> bool {
    profile.is_author
}

/// `Forbidden` unless the profile may publish.
pub fn require_author(profile: &profile::Model) -> AppResult<()> {
    if can_create_blog(profile) {
        Ok(())
    } else {
        Err(AppError::Forbidden(AUTHORS_ONLY_MESSAGE.to_string()))
    }
}
