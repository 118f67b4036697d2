use crate::utils::error_chain_fmt;

// 오류 관리를 편하게 하기 위한 래퍼 타입
// 오류 타입을 일치시킬 필요성이 있을 때 사용한다.
// 지역적으로 사용하는 에러는 사용하는 곳에 정의한다.
#[derive(thiserror::Error)]
pub enum PlaygroundError {
    #[error("IO Error")]
    IOError(#[from] std::io::Error),

    #[error("Config Error")]
    ConfigError(#[from] config::ConfigError),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PlaygroundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
