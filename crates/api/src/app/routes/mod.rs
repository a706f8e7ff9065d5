use axum::Router;

pub mod books;
pub mod system;

/// Router for all store-backed endpoints.
pub fn router() -> Router {
    Router::new().nest("/books", books::router())
}
