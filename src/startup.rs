use std::future::{Future, IntoFuture};

use axum::{body::Body, routing, Router};
use http::Request;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::{MakeSpan, TraceLayer};
use tower_sessions::{cookie::Key, Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;
use tracing::{Level, Span};

use crate::{
    routes::{greet, health_check, index_form, issue_csrf_token},
    settings::Settings,
};

// 프로세스 내부 세션 저장소에 보관하는 세션의 최대 개수
const SESSION_STORE_CAPACITY: u64 = 2_000;

pub struct Server {
    tcp_listener: TcpListener,
    session_key: Key,
}

impl Server {
    pub fn new(tcp_listener: TcpListener, session_key: Key) -> Server {
        Server {
            tcp_listener,
            session_key,
        }
    }

    pub async fn build(settings: &Settings) -> Result<Server, anyhow::Error> {
        let tcp_listener = settings.application.get_listener().await?;
        let session_key = settings.application.get_session_key()?;

        Ok(Server::new(tcp_listener, session_key))
    }

    pub fn run(self) -> impl Future<Output = Result<(), std::io::Error>> {
        // 세션은 프로세스 안의 Moka 저장소에만 보관한다.
        // 저장소가 프로세스와 수명을 같이 하므로 재시작하면 세션도 사라진다.
        let session_store = MokaStore::new(Some(SESSION_STORE_CAPACITY));
        let session_layer = SessionManagerLayer::new(session_store)
            .with_secure(false)
            // 마지막 요청 이후 한 시간이 지나면 세션이 만료된다.
            .with_expiry(Expiry::OnInactivity(time::Duration::hours(1)))
            .with_private(self.session_key);

        let app = Router::new()
            .route("/", routing::get(index_form).post(greet))
            // 토큰 발급은 메서드를 가리지 않는다.
            .route("/csrf", routing::any(issue_csrf_token))
            .route("/health_check", routing::get(health_check))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http().make_span_with(AddRequestID))
                    .layer(session_layer),
            );

        axum::serve(self.tcp_listener, app).into_future()
    }
}

// https://docs.rs/tower-http/0.5.2/src/tower_http/trace/make_span.rs.html#65-68의 코드를 참조했음
#[derive(Clone)]
struct AddRequestID;

impl MakeSpan<Body> for AddRequestID {
    fn make_span(&mut self, request: &Request<Body>) -> Span {
        tracing::span!(
            Level::ERROR,
            "request",
            request_id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
            error = tracing::field::Empty,
            error_detail = tracing::field::Empty,
        )
    }
}
