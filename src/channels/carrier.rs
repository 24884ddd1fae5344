//! Carrier channel — WhatsApp delivery via Twilio's Messages API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::channels::{Channel, InboundItem};
use crate::config::require_env;
use crate::error::{ChannelError, ConfigError};

/// Default Twilio API base URL.
const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Address prefix Twilio expects on WhatsApp sender/recipient numbers.
const CHANNEL_TAG: &str = "whatsapp:";

// ── Configuration ───────────────────────────────────────────────────

/// Carrier channel configuration.
#[derive(Debug, Clone)]
pub struct CarrierConfig {
    pub account_sid: String,
    pub auth_token: SecretString,
    pub from_number: String,
}

impl CarrierConfig {
    /// Build and validate a config. Empty fields fail fast with a named
    /// error instead of surfacing on the first transport call.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            account_sid: account_sid.into(),
            auth_token: SecretString::from(auth_token.into()),
            from_number: from_number.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Build config from the `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, and
    /// `TWILIO_PHONE` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            require_env("TWILIO_ACCOUNT_SID")?,
            require_env("TWILIO_AUTH_TOKEN")?,
            require_env("TWILIO_PHONE")?,
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("account_sid", &self.account_sid),
            ("from_number", &self.from_number),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingRequired {
                    key: format!("carrier.{key}"),
                    hint: "Set the Twilio credentials before registering the channel".into(),
                });
            }
        }
        if self.auth_token.expose_secret().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "carrier.auth_token".into(),
                hint: "Set the Twilio credentials before registering the channel".into(),
            });
        }
        Ok(())
    }
}

// ── Channel ─────────────────────────────────────────────────────────

/// Carrier channel — one authenticated form-encoded POST per message.
pub struct CarrierChannel {
    config: CarrierConfig,
    api_base: String,
    client: reqwest::Client,
}

impl CarrierChannel {
    pub fn new(config: CarrierConfig) -> Self {
        Self::with_base_url(config, DEFAULT_API_BASE.to_string())
    }

    /// Like [`CarrierChannel::new`] with the API base overridden (for tests).
    pub fn with_base_url(config: CarrierConfig, api_base: String) -> Self {
        Self {
            config,
            api_base,
            client: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.config.account_sid
        )
    }

    /// Submit one delivery request. Twilio acknowledges queued messages
    /// with HTTP 201; anything else is failure.
    async fn submit(&self, recipient: &str, text: &str) -> Result<(), ChannelError> {
        let form = [
            ("From", format!("{CHANNEL_TAG}{}", self.config.from_number)),
            ("To", format!("{CHANNEL_TAG}{recipient}")),
            ("Body", text.to_string()),
        ];

        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&form)
            .send()
            .await
            .map_err(|e| ChannelError::Http(e.to_string()))?;

        if resp.status() != reqwest::StatusCode::CREATED {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ChannelError::SendFailed {
                name: "whatsapp".into(),
                reason: format!("Messages.json returned {status}: {body}"),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Channel for CarrierChannel {
    fn name(&self) -> &str {
        "whatsapp"
    }

    async fn send(&self, recipient: &str, text: &str) -> bool {
        match self.submit(recipient, text).await {
            Ok(()) => {
                tracing::info!(recipient, "Carrier message accepted");
                true
            }
            Err(e) => {
                tracing::warn!(recipient, error = %e, "Carrier send failed");
                false
            }
        }
    }

    fn receive(&self) -> Vec<InboundItem> {
        // Inbound carrier messages would arrive via a webhook receiver,
        // which is not implemented.
        Vec::new()
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> CarrierConfig {
        CarrierConfig::new("AC123", "token", "+15550001111").unwrap()
    }

    // ── Config validation tests ─────────────────────────────────────

    #[test]
    fn config_rejects_empty_account_sid() {
        let err = CarrierConfig::new("", "token", "+15550001111").unwrap_err();
        assert!(err.to_string().contains("carrier.account_sid"));
    }

    #[test]
    fn config_rejects_empty_auth_token() {
        let err = CarrierConfig::new("AC123", "", "+15550001111").unwrap_err();
        assert!(err.to_string().contains("carrier.auth_token"));
    }

    #[test]
    fn config_rejects_empty_from_number() {
        let err = CarrierConfig::new("AC123", "token", "").unwrap_err();
        assert!(err.to_string().contains("carrier.from_number"));
    }

    #[test]
    fn config_accepts_complete_credentials() {
        assert!(CarrierConfig::new("AC123", "token", "+15550001111").is_ok());
    }

    // ── URL construction tests ──────────────────────────────────────

    #[test]
    fn messages_url_embeds_account_sid() {
        let ch = CarrierChannel::new(test_config());
        assert_eq!(
            ch.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn carrier_channel_name() {
        assert_eq!(CarrierChannel::new(test_config()).name(), "whatsapp");
    }

    // ── Send tests against a mocked transport ───────────────────────

    #[tokio::test]
    async fn send_returns_true_on_201() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(body_string_contains("From=whatsapp%3A%2B15550001111"))
            .and(body_string_contains("To=whatsapp%3A%2B15559998888"))
            .and(body_string_contains("Body=hello"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sid": "SM123",
                "status": "queued"
            })))
            .mount(&server)
            .await;

        let ch = CarrierChannel::with_base_url(test_config(), server.uri());
        assert!(ch.send("+15559998888", "hello").await);
    }

    #[tokio::test]
    async fn send_returns_false_on_200() {
        // Twilio signals acceptance with 201 specifically; a plain 200 is
        // treated as failure.
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let ch = CarrierChannel::with_base_url(test_config(), server.uri());
        assert!(!ch.send("+15559998888", "hello").await);
    }

    #[tokio::test]
    async fn send_returns_false_on_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": 20003,
                "message": "Authentication Error"
            })))
            .mount(&server)
            .await;

        let ch = CarrierChannel::with_base_url(test_config(), server.uri());
        assert!(!ch.send("+15559998888", "hello").await);
    }

    #[tokio::test]
    async fn send_returns_false_on_connection_fault() {
        // Use a dedicated (non-pooled) listener so dropping the server
        // synchronously closes the socket instead of returning it to
        // wiremock's internal pool for reuse.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let server = MockServer::builder().listener(listener).start().await;
        let uri = server.uri();
        drop(server);

        let ch = CarrierChannel::with_base_url(test_config(), uri);
        assert!(!ch.send("+15559998888", "hello").await);
    }

    // ── Receive tests ───────────────────────────────────────────────

    #[test]
    fn receive_is_always_empty() {
        let ch = CarrierChannel::new(test_config());
        assert!(ch.receive().is_empty());
    }
}
