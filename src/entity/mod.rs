//! SeaORM entity definitions.

pub mod blog;
pub mod favorite;
pub mod profile;
pub mod rating;
pub mod user;
