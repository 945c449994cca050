//! SMTP email delivery.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use sharehub_core::config::email::EmailConfig;
use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;

use super::templates;

/// Sends notification email over SMTP.
///
/// When email is disabled in configuration, send operations log the
/// intent and succeed so that development and tests need no SMTP server.
#[derive(Clone)]
pub struct EmailService {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl std::fmt::Debug for EmailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailService")
            .field("enabled", &self.transport.is_some())
            .field("from", &self.from)
            .finish()
    }
}

impl EmailService {
    /// Creates a new email service from configuration.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let from = format!("\"{}\" <{}>", config.from_name, config.from_address);

        if !config.enabled {
            return Ok(Self {
                transport: None,
                from,
            });
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::configuration(format!("Invalid SMTP host: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport: Some(transport),
            from,
        })
    }

    /// Creates a disabled service (used by tests).
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: "\"FileShare Hub\" <noreply@localhost>".to_string(),
        }
    }

    /// Sends the welcome email to a newly registered user.
    pub async fn send_welcome(&self, email: &str, name: &str) -> AppResult<()> {
        self.send(
            email,
            "Welcome to FileShare Hub",
            templates::welcome_email(name),
        )
        .await
    }

    /// Sends a password reset email with the given reset link.
    pub async fn send_password_reset(&self, email: &str, reset_url: &str) -> AppResult<()> {
        self.send(
            email,
            "Password Reset Request - FileShare Hub",
            templates::password_reset_email(reset_url),
        )
        .await
    }

    /// Verifies the SMTP configuration by opening a connection.
    pub async fn test_configuration(&self) -> AppResult<bool> {
        match &self.transport {
            None => Ok(false),
            Some(transport) => transport
                .test_connection()
                .await
                .map_err(|e| AppError::service_unavailable(format!("SMTP connection failed: {e}"))),
        }
    }

    async fn send(&self, to: &str, subject: &str, html_body: String) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            info!(to, subject, "Email disabled; skipping send");
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::configuration(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::validation(format!("Invalid recipient address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| AppError::internal(format!("Failed to build email: {e}")))?;

        transport.send(message).await.map_err(|e| {
            warn!(to, error = %e, "Email send failed");
            AppError::service_unavailable(format!("Email delivery failed: {e}"))
        })?;

        info!(to, subject, "Email sent");
        Ok(())
    }
}
