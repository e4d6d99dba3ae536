//! Alert delivery across independent channels
//!
//! Every configured channel gets exactly one delivery attempt per cycle.
//! A failure on one channel is logged and recorded in its outcome; it never
//! prevents the attempt on the next channel, and the dispatcher itself never
//! fails the cycle.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use reqwest::Client;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::config::{Config, EmailConfig, WebhookConfig};
use crate::error::DeliveryError;
use crate::{ChannelKind, DispatchOutcome};

/// Bound on every outbound network operation.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Fully composed alert, ready for delivery on any channel.
#[derive(Debug, Clone)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

/// One delivery mechanism.
///
/// Implementations must not retry; the dispatcher records a single outcome
/// per channel per cycle.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;
    async fn deliver(&self, alert: &AlertMessage) -> Result<(), DeliveryError>;
}

/// Posts the alert as a JSON payload to a chat webhook.
pub struct WebhookChannel {
    client: Client,
    config: WebhookConfig,
}

impl WebhookChannel {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl AlertChannel for WebhookChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Webhook
    }

    #[instrument(skip_all)]
    async fn deliver(&self, alert: &AlertMessage) -> Result<(), DeliveryError> {
        let payload = json!({
            "text": format!("⚠️ SERVER ALERT ⚠️\n{}", alert.body),
            "username": self.config.username,
            "icon_emoji": self.config.icon_emoji,
        });

        let response = self
            .client
            .post(&self.config.url)
            .timeout(DELIVERY_TIMEOUT)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DeliveryError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}

/// Sends the alert as a plain-text mail over SMTP with STARTTLS.
pub struct EmailChannel {
    config: EmailConfig,
}

impl EmailChannel {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AlertChannel for EmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    #[instrument(skip_all)]
    async fn deliver(&self, alert: &AlertMessage) -> Result<(), DeliveryError> {
        let email = Message::builder()
            .from(self.config.sender.parse()?)
            .to(self.config.receiver.parse()?)
            .subject(alert.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body.clone())?;

        // the transport lives only for this delivery; dropping it closes the
        // SMTP session on every exit path
        let mailer =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)?
                .port(self.config.smtp_port)
                .credentials(Credentials::new(
                    self.config.sender.clone(),
                    self.config.password.clone(),
                ))
                .timeout(Some(DELIVERY_TIMEOUT))
                .build();

        mailer.send(email).await?;
        Ok(())
    }
}

/// Attempts delivery on every configured channel, collecting one outcome per
/// channel.
pub struct AlertDispatcher {
    channels: Vec<Box<dyn AlertChannel>>,
}

impl AlertDispatcher {
    pub fn new(channels: Vec<Box<dyn AlertChannel>>) -> Self {
        Self { channels }
    }

    /// Build the channel set from the configuration; disabled channels are
    /// simply absent.
    pub fn from_config(config: &Config) -> Self {
        let mut channels: Vec<Box<dyn AlertChannel>> = Vec::new();

        if let Some(webhook) = &config.webhook {
            channels.push(Box::new(WebhookChannel::new(webhook.clone())));
        }
        if let Some(email) = &config.email {
            channels.push(Box::new(EmailChannel::new(email.clone())));
        }

        Self::new(channels)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[instrument(skip_all)]
    pub async fn dispatch(&self, alert: &AlertMessage) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::with_capacity(self.channels.len());

        for channel in &self.channels {
            let kind = channel.kind();
            match channel.deliver(alert).await {
                Ok(()) => {
                    info!("{kind} alert sent successfully");
                    outcomes.push(DispatchOutcome {
                        channel: kind,
                        succeeded: true,
                        error: None,
                    });
                }
                Err(e) => {
                    error!("failed to send {kind} alert: {e}");
                    outcomes.push(DispatchOutcome {
                        channel: kind,
                        succeeded: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        outcomes
    }
}
