pub mod customers;
pub mod notes;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Customers
        .route(
            "/api/customers",
            get(customers::list).post(customers::create),
        )
        .route(
            "/api/customers/{id}",
            get(customers::get)
                .put(customers::update)
                .delete(customers::delete),
        )
        // Notes
        .route("/api/customers/{id}/notes", post(notes::create))
        .route("/api/notes/{id}", delete(notes::delete))
}
