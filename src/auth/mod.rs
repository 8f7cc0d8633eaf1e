mod config;
mod middleware;

pub use config::AuthCheck;
pub use middleware::auth_middleware_fn;
