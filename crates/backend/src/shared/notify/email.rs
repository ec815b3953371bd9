use contracts::domain::contacts::message::ContactMessage;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::shared::config::EmailConfig;

/// Письмо владельцу сайта о новом сообщении через SMTP (STARTTLS)
pub async fn send(message: &ContactMessage, config: &EmailConfig) -> anyhow::Result<()> {
    let from: Mailbox = config.username.parse()?;
    let to: Mailbox = config.to.parse()?;

    let body = format!(
        "Новое сообщение с портфолио\n\n\
         От: {} <{}>\n\
         Тема: {}\n\n\
         {}\n\n\
         Получено: {}\n\
         ID: {}\n",
        message.name,
        message.email,
        message.subject,
        message.message,
        message.timestamps.created_at.format("%d.%m.%Y %H:%M"),
        message.id.0,
    );

    let email = Message::builder()
        .from(from)
        .to(to)
        .subject(format!("Новое сообщение от {}", message.name))
        .header(ContentType::TEXT_PLAIN)
        .body(body)?;

    let transport: AsyncSmtpTransport<Tokio1Executor> =
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

    transport.send(email).await?;
    tracing::info!("Email notification sent for contact message {}", message.id.0);
    Ok(())
}
