use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required secret is not set in `Secrets.toml`.
    #[error("Missing required secret: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Everything that can go wrong outside of startup validation.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// The OAuth2 token endpoint rejected the code or could not be reached.
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Boxed, serenity's error type is large.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
