//! Configuration for the webhook receiver

use crate::signature::headers;

/// Configuration for [`WebhookReceiver`](crate::WebhookReceiver)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverConfig {
    /// Header carrying the body signature
    pub signature_header: String,

    /// Maximum accepted body size in bytes
    pub max_payload_size: usize,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            signature_header: headers::SIGNATURE.to_string(),
            max_payload_size: 1024 * 1024, // 1MB
        }
    }
}

impl ReceiverConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ReceiverConfigBuilder {
        ReceiverConfigBuilder::new()
    }
}

/// Builder for ReceiverConfig
#[derive(Debug, Clone, Default)]
pub struct ReceiverConfigBuilder {
    config: ReceiverConfig,
}

impl ReceiverConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: ReceiverConfig::default(),
        }
    }

    /// Set the signature header name
    pub fn signature_header(mut self, header: impl Into<String>) -> Self {
        self.config.signature_header = header.into();
        self
    }

    /// Set maximum payload size
    pub fn max_payload_size(mut self, size: usize) -> Self {
        self.config.max_payload_size = size;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ReceiverConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReceiverConfig::default();
        assert_eq!(config.signature_header, "X-Wistia-Signature");
        assert_eq!(config.max_payload_size, 1024 * 1024);
    }

    #[test]
    fn test_builder() {
        let config = ReceiverConfig::builder()
            .signature_header("X-Forwarded-Signature")
            .max_payload_size(2048)
            .build();

        assert_eq!(config.signature_header, "X-Forwarded-Signature");
        assert_eq!(config.max_payload_size, 2048);
    }
}
