//! Webhook receiver for handling incoming Wistia deliveries

use crate::{
    Event, EventDelivery, ReceiverConfig, Result, WebhookError, parse_webhook_event_delivery,
    verify_signature,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Receiver for incoming webhooks
///
/// Holds the secret configured for one Wistia webhook. Every method verifies
/// the signature before looking at the body.
#[derive(Clone)]
pub struct WebhookReceiver {
    secret: String,
    config: ReceiverConfig,
}

impl std::fmt::Debug for WebhookReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookReceiver")
            .field("secret", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl WebhookReceiver {
    /// Create a new receiver with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_config(secret, ReceiverConfig::default())
    }

    /// Create a receiver with custom configuration
    pub fn with_config(secret: impl Into<String>, config: ReceiverConfig) -> Self {
        Self {
            secret: secret.into(),
            config,
        }
    }

    /// Get the receiver configuration
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Verify an incoming webhook signature
    pub fn verify(&self, payload: &[u8], signature: &str) -> bool {
        verify_signature(payload, signature, &self.secret)
    }

    /// Verify and parse an incoming webhook
    pub fn receive(&self, payload: &[u8], signature: &str) -> Result<EventDelivery> {
        self.check_size(payload)?;

        // Verify signature first
        if !self.verify(payload, signature) {
            warn!(bytes = payload.len(), "Rejected webhook with invalid signature");
            return Err(WebhookError::SignatureInvalid);
        }

        let delivery = parse_webhook_event_delivery(payload).inspect_err(|e| {
            warn!(error = %e, "Rejected malformed webhook delivery");
        })?;
        debug!(
            hook = %delivery.hook.uuid,
            events = delivery.len(),
            "Accepted webhook delivery"
        );
        Ok(delivery)
    }

    /// Verify signature from HTTP headers
    ///
    /// Header names are matched case-insensitively.
    pub fn verify_from_headers(
        &self,
        payload: &[u8],
        headers: &HashMap<String, String>,
    ) -> Result<bool> {
        let signature = self.signature_from(headers)?;
        Ok(self.verify(payload, signature))
    }

    /// Receive and parse webhook from HTTP headers and body
    pub fn receive_from_request(
        &self,
        payload: &[u8],
        headers: &HashMap<String, String>,
    ) -> Result<EventDelivery> {
        let signature = self.signature_from(headers)?;
        self.receive(payload, signature)
    }

    /// Create a handler for specific event types
    ///
    /// The filter is `"*"`, a prefix such as `"media.*"`, or an exact tag.
    pub fn handler<F>(&self, event_filter: &str, callback: F) -> WebhookHandler<F>
    where
        F: Fn(&Event) -> Result<()>,
    {
        WebhookHandler {
            receiver: self.clone(),
            event_filter: event_filter.to_string(),
            callback,
        }
    }

    fn signature_from<'h>(&self, headers: &'h HashMap<String, String>) -> Result<&'h str> {
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.config.signature_header))
            .map(|(_, value)| value.as_str())
            .ok_or(WebhookError::SignatureMissing)
    }

    fn check_size(&self, payload: &[u8]) -> Result<()> {
        if payload.len() > self.config.max_payload_size {
            return Err(WebhookError::PayloadTooLarge {
                size: payload.len(),
                max: self.config.max_payload_size,
            });
        }
        Ok(())
    }
}

/// A webhook handler that filters and processes specific events
pub struct WebhookHandler<F>
where
    F: Fn(&Event) -> Result<()>,
{
    receiver: WebhookReceiver,
    event_filter: String,
    callback: F,
}

impl<F> WebhookHandler<F>
where
    F: Fn(&Event) -> Result<()>,
{
    /// Handle an incoming webhook request
    ///
    /// Calls the callback for each matching event in delivery order and
    /// returns how many were handled. The first callback error aborts.
    pub fn handle(&self, payload: &[u8], signature: &str) -> Result<usize> {
        let delivery = self.receiver.receive(payload, signature)?;

        let mut handled = 0;
        for event in delivery.iter().filter(|e| self.matches_event(e.event_type().as_str())) {
            (self.callback)(event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Check if an event matches the filter
    fn matches_event(&self, event: &str) -> bool {
        if self.event_filter == "*" {
            return true;
        }

        if let Some(prefix) = self.event_filter.strip_suffix(".*") {
            return event
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('.'));
        }

        self.event_filter == event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_signature;
    use std::cell::RefCell;

    const SECRET: &str = "test-secret";

    fn body(event_types: &[&str]) -> Vec<u8> {
        let events: Vec<serde_json::Value> = event_types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                serde_json::json!({
                    "uuid": format!("event-{}", i),
                    "type": t,
                    "payload": {"media": {
                        "id": "vpe2p82q64",
                        "name": "Lenny",
                        "url": "https://harper.wistia.com/medias/vpe2p82q64",
                        "duration": 1.5,
                        "thumbnail": {"url": "http://embed.wistia.com/a.jpg"}
                    }},
                    "metadata": {"account_id": "0sxav1wj8o"},
                    "generated_at": "2020-03-31T21:56:45Z"
                })
            })
            .collect();

        serde_json::to_vec(&serde_json::json!({
            "hook": {"uuid": "a4ab9eb6-ab82-4dae-86f2-29f744f7d031"},
            "events": events
        }))
        .unwrap()
    }

    #[test]
    fn test_receive_valid() {
        let receiver = WebhookReceiver::new(SECRET);
        let payload = body(&["media.created"]);
        let signature = compute_signature(&payload, SECRET);

        let delivery = receiver.receive(&payload, &signature).unwrap();
        assert_eq!(delivery.len(), 1);
    }

    #[test]
    fn test_receive_invalid_signature() {
        let receiver = WebhookReceiver::new(SECRET);
        let payload = body(&["media.created"]);
        let signature = compute_signature(&payload, "wrong-secret");

        let result = receiver.receive(&payload, &signature);
        assert!(matches!(result, Err(WebhookError::SignatureInvalid)));
    }

    #[test]
    fn test_signature_checked_before_parsing() {
        let receiver = WebhookReceiver::new(SECRET);

        let result = receiver.receive(b"not json", "00");
        assert!(matches!(result, Err(WebhookError::SignatureInvalid)));
    }

    #[test]
    fn test_receive_signed_garbage_is_syntax_error() {
        let receiver = WebhookReceiver::new(SECRET);
        let signature = compute_signature(b"not json", SECRET);

        let result = receiver.receive(b"not json", &signature);
        assert!(matches!(result, Err(WebhookError::Syntax(_))));
    }

    #[test]
    fn test_payload_too_large() {
        let config = ReceiverConfig::builder().max_payload_size(16).build();
        let receiver = WebhookReceiver::with_config(SECRET, config);
        let payload = body(&[]);
        let signature = compute_signature(&payload, SECRET);

        let result = receiver.receive(&payload, &signature);
        assert!(matches!(result, Err(WebhookError::PayloadTooLarge { max: 16, .. })));
    }

    #[test]
    fn test_verify_from_headers_case_insensitive() {
        let receiver = WebhookReceiver::new(SECRET);
        let payload = body(&[]);

        let mut headers = HashMap::new();
        headers.insert(
            "x-wistia-signature".to_string(),
            compute_signature(&payload, SECRET),
        );

        assert!(receiver.verify_from_headers(&payload, &headers).unwrap());
    }

    #[test]
    fn test_verify_missing_signature() {
        let receiver = WebhookReceiver::new(SECRET);
        let headers = HashMap::new();

        let result = receiver.verify_from_headers(b"payload", &headers);
        assert!(matches!(result, Err(WebhookError::SignatureMissing)));
    }

    #[test]
    fn test_receive_from_request() {
        let receiver = WebhookReceiver::new(SECRET);
        let payload = body(&["media.ready", "media.failed"]);

        let mut headers = HashMap::new();
        headers.insert(
            "X-Wistia-Signature".to_string(),
            compute_signature(&payload, SECRET),
        );

        let delivery = receiver.receive_from_request(&payload, &headers).unwrap();
        assert_eq!(delivery.len(), 2);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let receiver = WebhookReceiver::new("super-secret");
        assert!(!format!("{:?}", receiver).contains("super-secret"));
    }

    #[test]
    fn test_handler_event_filter() {
        let receiver = WebhookReceiver::new(SECRET);
        let handler = receiver.handler("media.*", |_| Ok(()));

        assert!(handler.matches_event("media.created"));
        assert!(handler.matches_event("media.deleted"));
        assert!(!handler.matches_event("mediax.created"));
        assert!(!handler.matches_event("viewing_session.play"));
    }

    #[test]
    fn test_handler_exact_match() {
        let receiver = WebhookReceiver::new(SECRET);
        let handler = receiver.handler("media.ready", |_| Ok(()));

        assert!(handler.matches_event("media.ready"));
        assert!(!handler.matches_event("media.updated"));
    }

    #[test]
    fn test_handler_calls_matching_events_in_order() {
        let receiver = WebhookReceiver::new(SECRET);
        let seen = RefCell::new(Vec::new());
        let handler = receiver.handler("media.ready", |event| {
            seen.borrow_mut().push(event.uuid().to_string());
            Ok(())
        });

        let payload = body(&["media.ready", "media.created", "media.ready"]);
        let signature = compute_signature(&payload, SECRET);

        assert_eq!(handler.handle(&payload, &signature).unwrap(), 2);
        assert_eq!(*seen.borrow(), vec!["event-0", "event-2"]);
    }

    #[test]
    fn test_handler_error_aborts() {
        let receiver = WebhookReceiver::new(SECRET);
        let handler = receiver.handler("*", |_| Err(WebhookError::Handler("boom".to_string())));

        let payload = body(&["media.ready"]);
        let signature = compute_signature(&payload, SECRET);

        let result = handler.handle(&payload, &signature);
        assert!(matches!(result, Err(WebhookError::Handler(_))));
    }
}
