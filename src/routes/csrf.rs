use axum::{response::IntoResponse, Json};
use http::HeaderName;

use crate::{
    session_state::TypedSession,
    utils::{AppError500, CsrfToken},
};

pub const CSRF_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

// `curl -v http://127.0.0.1:8000/csrf => {"csrfToken":"..."}`
// 같은 토큰이 `X-CSRFToken` 응답 헤더에도 실린다.
#[tracing::instrument(name = "Issuing a CSRF token.", skip_all)]
pub async fn issue_csrf_token(
    session: TypedSession,
) -> Result<impl IntoResponse, AppError500> {
    // 세션에 토큰이 이미 있으면 재사용한다.
    // 토큰은 세션이 유지되는 동안 바뀌지 않는다.
    let csrf_token = match session.get_csrf_token().await.map_err(AppError500::new)? {
        Some(csrf_token) => csrf_token,
        None => {
            let csrf_token = CsrfToken::generate();
            session
                .insert_csrf_token(&csrf_token)
                .await
                .map_err(AppError500::new)?;
            csrf_token.into()
        }
    };

    let body = Json(serde_json::json!({ "csrfToken": &csrf_token }));

    Ok((
        http::StatusCode::OK,
        [(CSRF_TOKEN_HEADER, csrf_token)],
        body,
    ))
}
