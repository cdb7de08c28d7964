use chrono::{DateTime, NaiveDate, Utc};
use serenity::{
    all::{ChannelId, Http},
    async_trait,
};

use crate::{
    config::Config,
    error::AppError,
    quotes::weekly_quote,
    week::{month_day, week_date_range, weeks_passed_at},
};

/// Anything that can post a plain text message to a channel.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    async fn send(&self, channel_id: ChannelId, content: &str) -> Result<(), AppError>;
}

#[async_trait]
impl ChannelSender for Http {
    async fn send(&self, channel_id: ChannelId, content: &str) -> Result<(), AppError> {
        channel_id.say(self, content).await?;
        Ok(())
    }
}

/// The weekly post, or `None` while the study has not started yet.
pub fn scheduled_message(week: i64, epoch: NaiveDate, with_quote: bool) -> Option<String> {
    if week < 1 {
        return None;
    }

    let range = week_date_range(week, epoch);
    let mut message =
        format!("이번 주는 스터디 {week}주차 입니다. ({range}) 계속해서 열심히 해봅시다! 💪");
    if with_quote {
        message.push_str("\n> ");
        message.push_str(weekly_quote(week));
    }
    Some(message)
}

/// Reply for the keyword listener.
pub fn immediate_message(week: i64, epoch: NaiveDate) -> String {
    if week < 1 {
        return format!("스터디는 {}부터 시작합니다.", month_day(epoch));
    }

    let range = week_date_range(week, epoch);
    format!("오늘은 스터디 {week}주차 입니다. ({range}) 열심히 해봅시다!")
}

/// Posts this week's announcement to the configured channel.
///
/// Returns `false` without sending when `now` falls before the epoch.
pub async fn announce_weekly(
    sender: &dyn ChannelSender,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<bool, AppError> {
    let week = weeks_passed_at(now, config.epoch, &config.utc_offset);
    let Some(message) = scheduled_message(week, config.epoch, config.quotes_enabled) else {
        tracing::info!(
            "Study starts on {}, skipping weekly announcement",
            config.epoch
        );
        return Ok(false);
    };

    sender.send(config.channel_id, &message).await?;
    tracing::info!(
        "Posted week {} announcement to channel {}",
        week,
        config.channel_id
    );

    Ok(true)
}
