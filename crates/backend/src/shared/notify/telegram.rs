use contracts::domain::contacts::message::ContactMessage;
use serde_json::json;

use crate::shared::config::TelegramConfig;

/// Сообщение в чат владельца через Telegram Bot API
pub async fn send(message: &ContactMessage, config: &TelegramConfig) -> anyhow::Result<()> {
    let url = format!(
        "https://api.telegram.org/bot{}/sendMessage",
        config.bot_token
    );

    let text = format!(
        "🔔 Новое сообщение с портфолио\n\n\
         От: {} ({})\n\
         Тема: {}\n\n\
         {}\n\n\
         Дата: {} | ID: {}",
        message.name,
        message.email,
        message.subject,
        message.message,
        message.timestamps.created_at.format("%d.%m.%Y %H:%M"),
        message.id.0,
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let response = client
        .post(&url)
        .json(&json!({
            "chat_id": config.chat_id,
            "text": text,
            "disable_web_page_preview": true,
        }))
        .send()
        .await?;
    response.error_for_status()?;

    tracing::info!(
        "Telegram notification sent for contact message {}",
        message.id.0
    );
    Ok(())
}
