use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::{
    announce::{announce_weekly, ChannelSender},
    config::Config,
    oauth::{exchange_code, OAuth2Client},
    utils::{local_weekday, Clock},
};

const AUTH_SUCCESS: &str = "Authentication successful! You can close this window.";
const AUTH_FAILED: &str = "Authentication failed.";
const NO_CODE: &str = "No code provided";

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: reqwest::Client,
    pub oauth_client: OAuth2Client,
    pub sender: Arc<dyn ChannelSender>,
    pub clock: Clock,
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new().route("/callback", get(callback));
    if state.config.announce_trigger.serves_execute() {
        router = router.route("/execute", get(execute));
    }
    router.with_state(state)
}

#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
}

async fn callback(
    State(state): State<AppState>,
    params: Result<Query<CallbackParams>, QueryRejection>,
) -> &'static str {
    // A query string that doesn't deserialize (e.g. a repeated `code`) is
    // treated like a missing code so the page still answers 200.
    let code = match params {
        Ok(Query(params)) => params.code.filter(|code| !code.is_empty()),
        Err(rejection) => {
            tracing::debug!("Unreadable callback query: {}", rejection);
            None
        }
    };
    let Some(code) = code else {
        return NO_CODE;
    };

    match exchange_code(&state.oauth_client, &state.http_client, code).await {
        Ok(()) => {
            tracing::info!("OAuth2 authorization code exchanged");
            AUTH_SUCCESS
        }
        Err(e) => {
            tracing::error!("Error during authentication: {}", e);
            AUTH_FAILED
        }
    }
}

/// Entry point for an external cron service. Always answers 200, the body
/// tells whether anything was posted.
async fn execute(State(state): State<AppState>) -> &'static str {
    let now = (state.clock)();
    let weekday = local_weekday(now, &state.config.utc_offset);

    if weekday != state.config.execute_weekday {
        tracing::debug!(
            "Execute called on {}, announcements go out on {}",
            weekday,
            state.config.execute_weekday
        );
        return "skipped";
    }

    match announce_weekly(state.sender.as_ref(), &state.config, now).await {
        Ok(true) => "sent",
        Ok(false) => "skipped",
        Err(e) => {
            tracing::error!("Error sending weekly announcement: {}", e);
            "failed"
        }
    }
}
