use axum::response::Html;

/// Serve the embedded chat frontend
pub async fn frontend() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
