use std::sync::Once;

use playground_axum::{
    error::PlaygroundError,
    settings::Settings,
    startup::Server,
    telemetry::{get_tracing_subscriber, init_tracing_subscriber},
};
use tokio::net::TcpListener;
use tracing::{level_filters::LevelFilter, Subscriber};
use url::Url;

pub struct TestApp {
    pub settings: Settings,
}

impl TestApp {
    /// 애플리케이션 인스턴스를 새로 실행하고 그 핸들을 반환한다.
    // 백그라운드에서 애플리케이션을 구동한다.
    pub async fn spawn_app() -> Result<Self, PlaygroundError> {
        Self::set_tracing();
        let mut test_app = Self::init()?;

        // 포트를 무작위화해서 테스트 격리를 보장한다.
        let _ = tokio::spawn(test_app.build_test_server().await?.run());

        Ok(test_app)
    }

    // 테스트 로그 설정을 한다.
    fn set_tracing() {
        // 한번만 실행된다.
        static ONCE: Once = Once::new();
        ONCE.call_once(|| {
            // 트레이트 객체를 사용해서 타입 문제를 해결했다.
            let tracing_subscriber: Box<dyn Subscriber + Send + Sync> = std::env::var("TEST_LOG")
                .map_or(
                    Box::new(get_tracing_subscriber(LevelFilter::ERROR, std::io::sink)),
                    |_| Box::new(get_tracing_subscriber(LevelFilter::TRACE, std::io::stdout)),
                );
            init_tracing_subscriber(tracing_subscriber);
        });
    }

    fn init() -> Result<TestApp, config::ConfigError> {
        let settings = Settings::get_settings()?;

        Ok(TestApp { settings })
    }

    // 테스트 서버를 만든다.
    async fn build_test_server(&mut self) -> Result<Server, PlaygroundError> {
        let tcp_listener = self.get_test_tcp_listener().await?;
        let session_key = self.settings.application.get_session_key()?;

        Ok(Server::new(tcp_listener, session_key))
    }

    // 테스트 `TcpListener`를 생성한다.
    // 무작위 포트로 `TestApp`을 설정한다.
    async fn get_test_tcp_listener(&mut self) -> Result<TcpListener, std::io::Error> {
        self.settings.application.port = 0;
        let tcp_listener = self.settings.application.get_listener().await?;
        // OS가 할당한 포트 번호를 추출해서 설정에 반영한다.
        self.settings.application.port = tcp_listener.local_addr()?.port();

        Ok(tcp_listener)
    }

    pub fn uri(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "http://{}/",
            self.settings.application.get_address()
        ))
    }

    // /csrf의 주소를 얻는다.
    pub fn csrf_uri(&self) -> Result<Url, url::ParseError> {
        self.uri()?.join("csrf")
    }

    pub async fn get_index(&self) -> Result<reqwest::Response, anyhow::Error> {
        let response = reqwest::Client::new().get(self.uri()?).send().await?;

        Ok(response)
    }

    pub async fn post_index(
        &self,
        body: &'static str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let response = reqwest::Client::new()
            .post(self.uri()?)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;

        Ok(response)
    }

    pub async fn get_csrf(
        &self,
        client: &reqwest::Client,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let response = client.get(self.csrf_uri()?).send().await?;

        Ok(response)
    }
}
