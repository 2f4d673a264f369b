use askama::Template;
use axum::response::{Html, IntoResponse};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {}

/// Main page. The customer table itself is filled in client-side
/// against the JSON API.
pub async fn index() -> impl IntoResponse {
    let template = IndexTemplate {};
    Html(template.render().unwrap_or_default())
}
