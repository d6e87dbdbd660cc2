mod handlers;
mod routes;

pub use handlers::health;
pub use routes::api_routes;
