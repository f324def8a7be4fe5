mod error;
mod handlers;
mod router;
mod state;


pub use error::ApiError;
pub use router::app_router;
pub use state::AppState;
