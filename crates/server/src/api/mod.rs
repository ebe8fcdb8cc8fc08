pub mod batch;
pub mod handlers;
pub mod insight;
pub mod middleware;
pub mod routes;
pub mod search;
pub mod watch;

pub use routes::create_router;
