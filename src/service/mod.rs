//! Caching, rate limiting, and the inbound generation surface.

mod cache;
mod handler;
mod limiter;

pub use cache::{AudioCache, CacheEntry};
pub use handler::{
    ErrorBody, GenerateResponse, ServiceError, ServiceRequest, ServiceResponse, SpeechService,
};
pub use limiter::RateLimiter;
