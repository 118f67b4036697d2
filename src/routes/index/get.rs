use axum::response::IntoResponse;

pub async fn index_form() -> impl IntoResponse {
    (
        http::StatusCode::OK,
        [(http::header::CONTENT_TYPE, "text/html")],
        format!(include_str!("index.html"), message_html = ""),
    )
}
