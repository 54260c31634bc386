use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("api returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}

impl Error {
    #[must_use]
    pub fn api(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        // Bodies can be whole HTML error pages; keep the useful head.
        let body = body.into();
        let message: String = body.trim().chars().take(300).collect();
        Self::Api { status, message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
