use axum::response::{IntoResponse, Response};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub struct CsrfToken {
    csrf_token: String,
}

impl CsrfToken {
    /// 대소문자를 구분하는 무작위 32문자로 구성된 CSRF 토큰을 생성한다.
    pub fn generate() -> CsrfToken {
        let rng = thread_rng();

        let csrf_token = rng
            .sample_iter(Alphanumeric)
            .map(char::from)
            .take(32)
            .collect();

        CsrfToken { csrf_token }
    }
}

impl AsRef<str> for CsrfToken {
    fn as_ref(&self) -> &str {
        &self.csrf_token
    }
}

impl From<CsrfToken> for String {
    fn from(csrf_token: CsrfToken) -> String {
        csrf_token.csrf_token
    }
}

// HTML 본문에 끼워 넣는 값은 모두 이 함수를 통과시킨다.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub fn error_chain_fmt(
    e: &dyn std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> Result<(), std::fmt::Error> {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
#[error(transparent)]
pub struct AppError500(anyhow::Error);

impl std::fmt::Debug for AppError500 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for AppError500 {
    fn into_response(self) -> Response {
        tracing::Span::current()
            .record("error", tracing::field::display(&self))
            .record("error_detail", tracing::field::debug(self));

        http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl AppError500 {
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        AppError500(error.into())
    }
}
