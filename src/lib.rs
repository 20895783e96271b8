//! Foodblog server library.
//!
//! Recipe blogs grouped by cuisine: the filtered home feed, rating averages,
//! favorites and ratings, author-only publishing, and the accounts around them.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
