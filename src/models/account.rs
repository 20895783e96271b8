//! Account models: registration, login and profiles.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::entity::{profile, user};

/// Registration form.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1 to 150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password1: String,
    #[validate(must_match(other = "password1", message = "The two password fields didn't match"))]
    pub password2: String,
    /// Register as an author (may publish blogs).
    #[serde(default)]
    pub is_author: bool,
}

/// Letters, digits and `@ . + - _` only.
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username").with_message(Cow::Borrowed(
            "Username may contain only letters, numbers, and @/./+/-/_ characters",
        )))
    }
}

/// Login form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned after login or registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user_id: i32,
    pub username: String,
    pub is_author: bool,
}

/// Profile edit form. Empty strings clear a field.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    #[validate(length(max = 100, message = "Profile picture reference is too long"))]
    pub profile_pic: Option<String>,
    #[validate(
        url(message = "Enter a valid URL"),
        length(max = 200, message = "Social link must be at most 200 characters")
    )]
    pub social_link: Option<String>,
}

impl UpdateProfileRequest {
    /// Map empty strings to `None` before validation and storage.
    pub fn normalized(self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            bio: blank_to_none(self.bio),
            profile_pic: blank_to_none(self.profile_pic),
            social_link: blank_to_none(self.social_link),
        }
    }
}

/// Profile as shown on the profile and author pages.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub profile_id: i32,
    pub user_id: i32,
    pub username: String,
    /// Only shown to the profile owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_author: bool,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub social_link: Option<String>,
}

impl ProfileResponse {
    /// Public view of a profile (no email).
    pub fn public(profile: profile::Model, user: &user::Model) -> Self {
        Self {
            profile_id: profile.id,
            user_id: profile.user_id,
            username: user.username.clone(),
            email: None,
            is_author: profile.is_author,
            bio: profile.bio,
            profile_pic: profile.profile_pic,
            social_link: profile.social_link,
        }
    }

    /// Owner's view of their own profile.
    pub fn private(profile: profile::Model, user: &user::Model) -> Self {
        Self {
            email: Some(user.email.clone()),
            ..Self::public(profile, user)
        }
    }
}
