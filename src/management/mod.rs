mod auth;

pub use auth::TokenManager;
pub use auth::is_expired_at;
