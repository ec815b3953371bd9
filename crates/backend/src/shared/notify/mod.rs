//! Уведомления о новых сообщениях контактной формы: email + Telegram.
//!
//! Каналы независимы, сбой одного не мешает другому; наружу ошибки не
//! поднимаются никогда — только флаги и логи. Ретраев нет.

pub mod email;
pub mod telegram;

use contracts::domain::contacts::message::ContactMessage;

use crate::shared::config::NotificationsConfig;

/// Итог доставки по каналам
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyOutcome {
    pub email: bool,
    pub telegram: bool,
}

pub async fn notify_contact_message(
    message: &ContactMessage,
    config: &NotificationsConfig,
) -> NotifyOutcome {
    let email = match &config.email {
        Some(email_config) => match email::send(message, email_config).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to send email notification: {e:#}");
                false
            }
        },
        None => {
            tracing::warn!("Email channel is not configured, skipping notification");
            false
        }
    };

    let telegram = match &config.telegram {
        Some(telegram_config) => match telegram::send(message, telegram_config).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to send Telegram notification: {e:#}");
                false
            }
        },
        None => {
            tracing::warn!("Telegram channel is not configured, skipping notification");
            false
        }
    };

    let outcome = NotifyOutcome { email, telegram };
    match (outcome.email, outcome.telegram) {
        (true, true) => tracing::info!(
            "All notifications sent for contact message {}",
            message.id.0
        ),
        (false, false) => tracing::error!(
            "All notification channels failed for contact message {}",
            message.id.0
        ),
        _ => tracing::warn!(
            "Partial notification success for contact message {}: email={}, telegram={}",
            message.id.0,
            outcome.email,
            outcome.telegram
        ),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::contacts::message::{ContactMessage, ContactMessageDto};

    fn message() -> ContactMessage {
        ContactMessage::new_for_insert(
            &ContactMessageDto {
                name: "Dana".into(),
                email: "dana@example.com".into(),
                subject: "Hi".into(),
                message: "Nice site".into(),
            },
            None,
            String::new(),
        )
    }

    #[tokio::test]
    async fn test_unconfigured_channels_report_independent_flags() {
        // Оба канала не настроены: обе попытки фиксируются как неуспех,
        // вызов не падает
        let outcome = notify_contact_message(&message(), &NotificationsConfig::default()).await;
        assert_eq!(
            outcome,
            NotifyOutcome {
                email: false,
                telegram: false
            }
        );
    }

    #[tokio::test]
    async fn test_one_unreachable_channel_does_not_mask_the_other() {
        // Telegram указывает на недоступный адрес; email не настроен.
        // Два независимых флага всё равно возвращаются.
        let config = NotificationsConfig {
            email: None,
            telegram: Some(crate::shared::config::TelegramConfig {
                bot_token: "invalid-token".into(),
                chat_id: "1".into(),
            }),
        };
        let outcome = notify_contact_message(&message(), &config).await;
        assert!(!outcome.email);
        assert!(!outcome.telegram);
    }
}
