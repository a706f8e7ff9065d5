use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_book).get(list_books))
        .route("/:title", put(update_book).delete(delete_book))
}

pub async fn create_book(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateBookRequest>,
) -> axum::response::Response {
    match services
        .directory
        .create(body.title, body.author, body.category)
        .await
    {
        Ok(book) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "created",
                "book": dto::book_to_json(book),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_books(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.directory.list().await {
        Ok(books) => {
            let items = books.into_iter().map(dto::book_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!(items))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(title): Path<String>,
    Json(body): Json<dto::UpdateBookRequest>,
) -> axum::response::Response {
    match services.directory.update(&title, body.into_patch()).await {
        Ok(book) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "updated",
                "book": dto::book_to_json(book),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(title): Path<String>,
) -> axum::response::Response {
    match services.directory.delete(&title).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "deleted",
                "title": title,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
