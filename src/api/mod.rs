pub mod client_ip;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;

pub use router::{create_router, AppState};
