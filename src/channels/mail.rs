//! Mail channel — outbound plain-text mail over implicit-TLS SMTP via lettre.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};

use crate::channels::{Channel, InboundItem};
use crate::config::require_env;
use crate::error::{ChannelError, ConfigError};

/// Implicit-TLS SMTP submission port.
const SUBMISSION_PORT: u16 = 465;

/// Subject line for every outbound message.
const SUBJECT: &str = "Automated Response";

// ── Configuration ───────────────────────────────────────────────────

/// Mail channel configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub sender_address: String,
    pub password: SecretString,
}

impl MailConfig {
    /// Build and validate a config. Empty fields fail fast with a named
    /// error instead of surfacing on the first transport call.
    pub fn new(
        smtp_host: impl Into<String>,
        sender_address: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            smtp_host: smtp_host.into(),
            sender_address: sender_address.into(),
            password: SecretString::from(password.into()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Build config from environment variables: `EMAIL` and `EMAIL_PASSWORD`,
    /// plus optional `SMTP_HOST` (defaults to Gmail's submission host).
    pub fn from_env() -> Result<Self, ConfigError> {
        let smtp_host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        Self::new(smtp_host, require_env("EMAIL")?, require_env("EMAIL_PASSWORD")?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("smtp_host", &self.smtp_host),
            ("sender_address", &self.sender_address),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingRequired {
                    key: format!("mail.{key}"),
                    hint: "Set the SMTP credentials before registering the channel".into(),
                });
            }
        }
        if self.password.expose_secret().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "mail.password".into(),
                hint: "Set the SMTP credentials before registering the channel".into(),
            });
        }
        if !self.sender_address.contains('@') {
            return Err(ConfigError::InvalidValue {
                key: "mail.sender_address".into(),
                message: format!("'{}' is not a mail address", self.sender_address),
            });
        }
        Ok(())
    }
}

// ── Channel ─────────────────────────────────────────────────────────

/// Mail channel — one SMTP session per send, released on exit either way.
pub struct MailChannel {
    config: MailConfig,
}

impl MailChannel {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// Send one plain-text message with the fixed subject line.
    fn send_mail(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        let email = Message::builder()
            .from(self.config.sender_address.parse().map_err(|e| {
                ChannelError::SendFailed {
                    name: "email".into(),
                    reason: format!("Invalid from address: {e}"),
                }
            })?)
            .to(to.parse().map_err(|e| ChannelError::SendFailed {
                name: "email".into(),
                reason: format!("Invalid to address: {e}"),
            })?)
            .subject(SUBJECT)
            .body(body.to_string())
            .map_err(|e| ChannelError::SendFailed {
                name: "email".into(),
                reason: format!("Failed to build email: {e}"),
            })?;

        let creds = Credentials::new(
            self.config.sender_address.clone(),
            self.config.password.expose_secret().to_string(),
        );

        // The transport lives only for this call; dropping it closes the
        // session whether or not the send succeeded.
        let transport = SmtpTransport::relay(&self.config.smtp_host)
            .map_err(|e| ChannelError::SendFailed {
                name: "email".into(),
                reason: format!("SMTP relay error: {e}"),
            })?
            .port(SUBMISSION_PORT)
            .credentials(creds)
            .build();

        transport.send(&email).map_err(|e| ChannelError::SendFailed {
            name: "email".into(),
            reason: format!("SMTP send failed: {e}"),
        })?;

        Ok(())
    }
}

#[async_trait]
impl Channel for MailChannel {
    fn name(&self) -> &str {
        "email"
    }

    async fn send(&self, recipient: &str, text: &str) -> bool {
        match self.send_mail(recipient, text) {
            Ok(()) => {
                tracing::info!(recipient, "Email sent");
                true
            }
            Err(e) => {
                tracing::warn!(recipient, error = %e, "Email send failed");
                false
            }
        }
    }

    fn receive(&self) -> Vec<InboundItem> {
        // Inbound mail would need an IMAP poller, which is not implemented.
        Vec::new()
    }
}

// ── Tests ───────────────────────────────────────────────────────────
