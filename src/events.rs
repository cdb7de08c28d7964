use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serenity::{
    all::{Context, EventHandler, Message, Ready},
    async_trait,
};

use crate::{announce::immediate_message, config::Config, week::weeks_passed_at};

pub struct Handler {
    pub config: Arc<Config>,
}

/// Reply for a chat message, if it mentions the study keyword.
pub fn keyword_reply(content: &str, keyword: &str, week: i64, epoch: NaiveDate) -> Option<String> {
    if keyword.is_empty() || !content.to_lowercase().contains(&keyword.to_lowercase()) {
        return None;
    }
    Some(immediate_message(week, epoch))
}

#[async_trait]
impl EventHandler for Handler {
    // Event handlers are dispatched through a threadpool, and so multiple events can be
    // dispatched simultaneously.
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let config = &self.config;
        let week = weeks_passed_at(Utc::now(), config.epoch, &config.utc_offset);
        let Some(reply) = keyword_reply(&msg.content, &config.keyword, week, config.epoch) else {
            return;
        };

        if let Err(why) = msg.channel_id.say(&ctx.http, reply).await {
            tracing::error!("Error sending message: {why}");
        }
    }

    // Called once the shard receives the READY payload. Also checks that the
    // announcement channel exists and lives in the configured guild.
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected!", ready.user.name);

        match ctx.http.get_channel(self.config.channel_id).await {
            Ok(channel) => match channel.guild() {
                Some(channel) if channel.guild_id == self.config.guild_id => {
                    tracing::info!("Announcing in #{} ({})", channel.name, channel.id);
                }
                Some(channel) => tracing::error!(
                    "Channel {} belongs to guild {}, expected {}",
                    channel.id,
                    channel.guild_id,
                    self.config.guild_id
                ),
                None => tracing::error!(
                    "Channel {} is not a guild channel",
                    self.config.channel_id
                ),
            },
            Err(why) => tracing::error!(
                "Announcement channel {} not found: {why}",
                self.config.channel_id
            ),
        }
    }
}
