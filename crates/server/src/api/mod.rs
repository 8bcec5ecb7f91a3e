pub mod cycles;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod photos;
pub mod routes;
pub mod session;

pub use routes::create_router;
