//! Error types for the health check pipeline

use std::fmt;
use std::path::PathBuf;

/// Errors raised while sampling host resources
#[derive(Debug)]
pub enum CollectionError {
    /// The host reported no processors
    NoCpus,

    /// The host reported zero total memory
    NoMemory,

    /// No disk is mounted at the requested path
    DiskNotFound(PathBuf),
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::NoCpus => write!(f, "host reported no processors"),
            CollectionError::NoMemory => write!(f, "host reported zero total memory"),
            CollectionError::DiskNotFound(path) => {
                write!(f, "no disk mounted at {}", path.display())
            }
        }
    }
}

impl std::error::Error for CollectionError {}

/// Errors raised while delivering an alert on a single channel
#[derive(Debug)]
pub enum DeliveryError {
    /// Webhook request failed in transport (connect, timeout, TLS)
    Request(reqwest::Error),

    /// Webhook endpoint answered with a non-success status
    Status(u16),

    /// SMTP session failed (connect, STARTTLS, auth, send)
    Smtp(lettre::transport::smtp::Error),

    /// Sender or receiver address could not be parsed
    Address(lettre::address::AddressError),

    /// The mail message could not be assembled
    Message(lettre::error::Error),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Request(err) => write!(f, "webhook request failed: {}", err),
            DeliveryError::Status(status) => {
                write!(f, "webhook returned status {}", status)
            }
            DeliveryError::Smtp(err) => write!(f, "SMTP delivery failed: {}", err),
            DeliveryError::Address(err) => write!(f, "invalid email address: {}", err),
            DeliveryError::Message(err) => write!(f, "failed to build email: {}", err),
        }
    }
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeliveryError::Request(err) => Some(err),
            DeliveryError::Smtp(err) => Some(err),
            DeliveryError::Address(err) => Some(err),
            DeliveryError::Message(err) => Some(err),
            DeliveryError::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Request(err)
    }
}

impl From<lettre::transport::smtp::Error> for DeliveryError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        DeliveryError::Smtp(err)
    }
}

impl From<lettre::address::AddressError> for DeliveryError {
    fn from(err: lettre::address::AddressError) -> Self {
        DeliveryError::Address(err)
    }
}

impl From<lettre::error::Error> for DeliveryError {
    fn from(err: lettre::error::Error) -> Self {
        DeliveryError::Message(err)
    }
}

/// Failure of a whole check cycle
#[derive(Debug)]
pub enum CheckError {
    /// A metric could not be sampled; the cycle was aborted
    Collection(CollectionError),

    /// Something else went wrong inside the cycle
    Unexpected(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Collection(err) => write!(f, "metric collection failed: {}", err),
            CheckError::Unexpected(msg) => {
                write!(f, "health check aborted unexpectedly: {}", msg)
            }
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::Collection(err) => Some(err),
            CheckError::Unexpected(_) => None,
        }
    }
}

impl From<CollectionError> for CheckError {
    fn from(err: CollectionError) -> Self {
        CheckError::Collection(err)
    }
}
