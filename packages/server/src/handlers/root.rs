use axum::response::Redirect;

/// Entry page of the front-end, served from the static directory.
pub const INDEX_PAGE: &str = "/static/index.html";

pub async fn index() -> Redirect {
    Redirect::temporary(INDEX_PAGE)
}
