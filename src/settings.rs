use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use serde_aux::prelude::deserialize_number_from_string;
use tokio::net::TcpListener;
use tower_sessions::cookie::Key;

use crate::startup::Server;

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    // 세션 쿠키 암호화 키의 원본이 된다.
    pub hmac_secret: Secret<String>,
}

/// 애플리케이션이 사용할 수 있는 런타임 환경
pub enum Environment {
    Local,
    Production,
}

// `Settings`를 이용해서 필요한 타입을 생성한다.
// 복잡함을 피하기 위해서 `get_settings`를 제외하고는 되도록이면 래퍼 함수로 작성한다.
impl Settings {
    pub fn get_settings() -> Result<Self, config::ConfigError> {
        let base_path =
            std::env::current_dir().expect("Failed to determine the current directory.");
        let settings_directory = base_path.join("settings");

        // 실행 환경을 식별한다.
        // 지정되지 않았으면 `local`로 기본 설정한다.
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or("local".into())
            .as_str()
            .try_into()
            .expect("Failed to parse APP_ENVIRONMENT.");
        let environment_filename = format!("{}.json", environment.as_str());

        let settings = config::Config::builder()
            .add_source(config::File::from(settings_directory.join("base.json")))
            .add_source(config::File::from(
                settings_directory.join(environment_filename),
            ))
            // 환경 변수로부터 설정에 추가한다.
            // `APP_APPLICATION__PORT=5001` => `Settings.application.port`
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        settings.try_deserialize::<Settings>()
    }

    pub async fn build_server(&self) -> Result<Server, anyhow::Error> {
        Server::build(self).await
    }
}

impl ApplicationSettings {
    pub fn get_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub async fn get_listener(&self) -> Result<TcpListener, std::io::Error> {
        TcpListener::bind(self.get_address()).await
    }

    // `hmac_secret`으로부터 세션 쿠키 암호화 키를 만든다.
    // `Key::try_from`은 64바이트 미만의 입력을 거부한다.
    pub fn get_session_key(&self) -> Result<Key, anyhow::Error> {
        Key::try_from(self.hmac_secret.expose_secret().as_bytes())
            .context("The hmac_secret must be at least 64 bytes long.")
    }
}

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<&str> for Environment {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
