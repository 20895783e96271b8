//! Domain models and request/response DTOs.

pub mod account;
pub mod blog;
pub mod category;
pub mod interaction;

// Re-export commonly used types
pub use account::{
    LoginRequest, ProfileResponse, RegisterRequest, SessionResponse, UpdateProfileRequest,
};
pub use blog::{
    AuthorDetailResponse, AuthorSummary, BlogDetailResponse, BlogFormResponse, BlogSummary,
    BlogWithRating, CreateBlogRequest, FeedFilters, FeedQuery, FeedResponse, RatingBounds,
};
pub use category::Category;
pub use interaction::{FavoriteResponse, RateRequest, RatingResponse};

/// Lowest accepted rating value.
pub const MIN_RATING: i32 = 0;
/// Highest accepted rating value.
pub const MAX_RATING: i32 = 6;
