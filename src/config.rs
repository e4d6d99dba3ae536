use std::path::PathBuf;
use std::str::FromStr;

use tracing::trace;

const CPU_THRESHOLD: &str = "CPU_THRESHOLD";
const MEMORY_THRESHOLD: &str = "MEMORY_THRESHOLD";
const DISK_THRESHOLD: &str = "DISK_THRESHOLD";
const DISK_PATH: &str = "DISK_PATH";

const WEBHOOK_URL: &str = "WEBHOOK_URL";
const WEBHOOK_USERNAME: &str = "WEBHOOK_USERNAME";
const WEBHOOK_ICON: &str = "WEBHOOK_ICON";

const SMTP_SERVER: &str = "SMTP_SERVER";
const SMTP_PORT: &str = "SMTP_PORT";
const SENDER_EMAIL: &str = "SENDER_EMAIL";
const RECEIVER_EMAIL: &str = "RECEIVER_EMAIL";
const EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";

/// Percentage limits for the sampled metrics
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_cpu_threshold")]
    pub cpu: f32,
    #[serde(default = "default_memory_threshold")]
    pub memory: f32,
    #[serde(default = "default_disk_threshold")]
    pub disk: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            cpu: default_cpu_threshold(),
            memory: default_memory_threshold(),
            disk: default_disk_threshold(),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    /// Display name shown as the sender of the webhook message
    #[serde(default = "default_webhook_username")]
    pub username: String,
    #[serde(default = "default_webhook_icon")]
    pub icon_emoji: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_email_address")]
    pub sender: String,
    #[serde(default = "default_email_address")]
    pub receiver: String,
    #[serde(default = "default_email_password")]
    pub password: String,
}

/// Immutable configuration for one health check process.
///
/// A channel left as `None` is disabled and never attempted; there is no
/// placeholder-value detection.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Mount point sampled for storage utilization
    #[serde(default = "default_disk_path")]
    pub disk_path: PathBuf,

    #[serde(default)]
    pub webhook: Option<WebhookConfig>,

    #[serde(default)]
    pub email: Option<EmailConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            thresholds: Thresholds::default(),
            disk_path: default_disk_path(),
            webhook: None,
            email: None,
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// Every value has a fallback, so an empty environment yields a usable
    /// configuration with both alert channels disabled. A channel is enabled
    /// only when its primary variable (`WEBHOOK_URL`, `SMTP_SERVER`) is set.
    pub fn from_env() -> Config {
        Config {
            thresholds: Thresholds {
                cpu: env_or(CPU_THRESHOLD, default_cpu_threshold()),
                memory: env_or(MEMORY_THRESHOLD, default_memory_threshold()),
                disk: env_or(DISK_THRESHOLD, default_disk_threshold()),
            },
            disk_path: std::env::var(DISK_PATH).map_or_else(|_| default_disk_path(), PathBuf::from),
            webhook: std::env::var(WEBHOOK_URL).ok().map(|url| WebhookConfig {
                url,
                username: env_or_string(WEBHOOK_USERNAME, default_webhook_username()),
                icon_emoji: env_or_string(WEBHOOK_ICON, default_webhook_icon()),
            }),
            email: std::env::var(SMTP_SERVER).ok().map(|smtp_server| EmailConfig {
                smtp_server,
                smtp_port: env_or(SMTP_PORT, default_smtp_port()),
                sender: env_or_string(SENDER_EMAIL, default_email_address()),
                receiver: env_or_string(RECEIVER_EMAIL, default_email_address()),
                password: env_or_string(EMAIL_PASSWORD, default_email_password()),
            }),
        }
    }
}

fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key).map_or(default, |raw| raw.parse().unwrap_or(default))
}

fn env_or_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn default_cpu_threshold() -> f32 {
    80.0
}

fn default_memory_threshold() -> f32 {
    85.0
}

fn default_disk_threshold() -> f32 {
    90.0
}

fn default_disk_path() -> PathBuf {
    PathBuf::from("/")
}

fn default_webhook_username() -> String {
    String::from("Health Monitor")
}

fn default_webhook_icon() -> String {
    String::from(":warning:")
}

fn default_smtp_server() -> String {
    String::from("smtp.gmail.com")
}

fn default_smtp_port() -> u16 {
    587
}

fn default_email_address() -> String {
    String::from("dev@example.com")
}

fn default_email_password() -> String {
    String::from("DEV_PASSWORD")
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|e| anyhow::anyhow!("invalid configuration file: {e}"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
