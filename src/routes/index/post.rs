use axum::{response::IntoResponse, Form};

use crate::utils::html_escape;

#[derive(serde::Deserialize)]
pub struct FormData {
    name: String,
}

// `curl --request POST --data 'name=Ada' --verbose http://127.0.0.1:8000/`
// => 200 OK "Hello, Ada"
// `curl --request POST --data '' --verbose http://127.0.0.1:8000/`
// => 422 Unprocessable Entity Form 직렬화 실패
#[tracing::instrument(
    name = "Greeting a visitor.",
    skip_all,
    fields(
        visitor_name = %form.name,
    )
)]
pub async fn greet(
    // axum의 특성상 Form은 마지막으로 가야 한다.
    Form(form): Form<FormData>,
) -> impl IntoResponse {
    let message_html = format!("<p>Hello, {}</p>\n", html_escape(&form.name));

    (
        http::StatusCode::OK,
        [(http::header::CONTENT_TYPE, "text/html")],
        format!(include_str!("index.html"), message_html = message_html),
    )
}
