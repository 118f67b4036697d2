use axum::{async_trait, extract::FromRequestParts};
use http::{request::Parts, StatusCode};
use tower_sessions::Session;

use crate::utils::CsrfToken;

// 핸들러는 이 타입을 통해서만 세션에 접근한다.
pub struct TypedSession {
    session: Session,
}

impl TypedSession {
    const CSRF_TOKEN_KEY: &'static str = "csrf_token";

    pub async fn get_csrf_token(
        &self,
    ) -> Result<Option<String>, tower_sessions::session::Error> {
        self.session.get(Self::CSRF_TOKEN_KEY).await
    }

    pub async fn insert_csrf_token(
        &self,
        csrf_token: &CsrfToken,
    ) -> Result<(), tower_sessions::session::Error> {
        self.session
            .insert(Self::CSRF_TOKEN_KEY, csrf_token.as_ref())
            .await
    }
}

// https://docs.rs/axum/0.7.5/axum/extract/index.html#accessing-other-extractors-in-fromrequest-or-fromrequestparts-implementations
// 이 곳의 코드를 참고로 했다.
#[async_trait]
impl<S> FromRequestParts<S> for TypedSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);
    async fn from_request_parts(req: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(TypedSession {
            session: Session::from_request_parts(req, state).await?,
        })
    }
}
