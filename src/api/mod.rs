//! REST API for word lookups
//!
//! `GET /api/health`, `GET /api/search?word=..` and `GET /api/schema`.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::AppError;
pub use router::build_router;
pub use state::AppState;
