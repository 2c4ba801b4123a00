//! Outbound delivery channel for appointment notices.
//!
//! Providers:
//! - `console`: logs the notice (development)
//!
//! A disabled or unknown-provider mailer is a valid state the dispatch
//! job checks for before attempting delivery.

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::config::NotificationsConfig;

/// Errors that can occur during notice delivery.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Delivery channel not configured")]
    NotConfigured,

    #[error("Failed to deliver notice: {0}")]
    DeliveryFailed(String),
}

/// Delivery channel: given a destination, a subject, and a body, deliver
/// or fail.
#[derive(Clone)]
pub struct Mailer {
    config: Arc<NotificationsConfig>,
}

impl Mailer {
    pub fn new(config: NotificationsConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Whether outbound delivery is configured at all.
    pub fn is_configured(&self) -> bool {
        self.config.enabled
    }

    /// Delivers a notice to the given address.
    pub async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        if !self.config.enabled {
            return Err(MailerError::NotConfigured);
        }

        match self.config.provider.as_str() {
            "console" => {
                info!(
                    to = %to,
                    subject = %subject,
                    from = %self.config.sender_email,
                    from_name = %self.config.sender_name,
                    "Notice (console provider)"
                );
                info!(body = %body, "Notice body");
                Ok(())
            }
            provider => {
                error!(provider = %provider, "Unknown delivery provider");
                Err(MailerError::NotConfigured)
            }
        }
    }
}
