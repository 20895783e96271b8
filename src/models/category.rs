//! Blog categories.

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Cuisine a blog is filed under. The set is closed and stored by name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum Category {
    #[sea_orm(string_value = "Desi")]
    Desi,
    #[sea_orm(string_value = "American")]
    American,
    #[sea_orm(string_value = "Italian")]
    Italian,
    #[sea_orm(string_value = "Arabian")]
    Arabian,
    #[sea_orm(string_value = "Greek")]
    Greek,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Desi,
        Category::American,
        Category::Italian,
        Category::Arabian,
        Category::Greek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desi => "Desi",
            Self::American => "American",
            Self::Italian => "Italian",
            Self::Arabian => "Arabian",
            Self::Greek => "Greek",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::InvalidInput(format!("Unknown category '{}'", s)))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
