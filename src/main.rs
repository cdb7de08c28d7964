mod announce;
mod config;
mod error;
mod events;
mod oauth;
mod quotes;
mod scheduler;
mod server;
mod service;
mod utils;
mod week;

use std::sync::Arc;

use shuttle_runtime::SecretStore;

use config::Config;
use events::Handler;
use oauth::{setup_oauth_client, setup_reqwest_client};
use serenity::prelude::*;
use server::AppState;
use service::StudyBot;
use utils::system_clock;

#[shuttle_runtime::main]
async fn study_bot(
    #[shuttle_runtime::Secrets] secrets: SecretStore,
) -> Result<StudyBot, shuttle_runtime::Error> {
    Ok(build(&secrets).await?)
}

async fn build(secrets: &SecretStore) -> anyhow::Result<StudyBot> {
    // All keys are read from `Secrets.toml`
    let config = Arc::new(Config::from_secrets(secrets)?);

    tracing::info!(
        "Study week 1 starts on {}, announcing to channel {}",
        config.epoch,
        config.channel_id
    );

    // Set gateway intents, which decides what events the bot will be notified about
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler {
            config: config.clone(),
        })
        .await?;

    let state = AppState {
        config: config.clone(),
        http_client: setup_reqwest_client()?,
        oauth_client: setup_oauth_client(&config)?,
        sender: client.http.clone(),
        clock: system_clock(),
    };

    Ok(StudyBot {
        router: server::router(state),
        config,
        client,
    })
}
