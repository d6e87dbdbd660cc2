mod handlers;
mod routes;

pub use handlers::ANALYZE_PATH;
pub use routes::dashboard_routes;
