//! Wistia webhook ingestion
//!
//! This crate verifies and parses the webhook deliveries Wistia POSTs to your
//! application when media in your account change.
//!
//! # Features
//!
//! - **Signature Verification**: HMAC-SHA256 of the raw body, compared in
//!   constant time against the `X-Wistia-Signature` header
//! - **Typed Events**: one enum variant per event type, selected by the
//!   `type` tag and validated field by field
//! - **All-or-nothing Parsing**: a single malformed event rejects the whole
//!   delivery
//! - **Receiver**: verify-then-parse helper with per-event-type handlers
//!
//! # Example: Verifying and Parsing
//!
//! ```rust
//! use wistia_webhooks::{compute_signature, parse_webhook_event_delivery, verify_signature};
//!
//! let body = br#"{
//!     "hook": {"uuid": "a4ab9eb6-ab82-4dae-86f2-29f744f7d031"},
//!     "events": [{
//!         "uuid": "fc53f8f78b67d04d455029813f8ec1ef",
//!         "type": "media.deleted",
//!         "payload": {"media": {"id": "f5diqltruh"}},
//!         "metadata": {"account_id": "0sxav1wj8o"},
//!         "generated_at": "2020-03-31T21:56:45Z"
//!     }]
//! }"#;
//! let header = compute_signature(body, "secret-key");
//!
//! assert!(verify_signature(body, &header, "secret-key"));
//!
//! let delivery = parse_webhook_event_delivery(body).unwrap();
//! assert_eq!(delivery.events[0].media_id(), "f5diqltruh");
//! ```
//!
//! # Example: Receiver
//!
//! ```rust,no_run
//! use wistia_webhooks::WebhookReceiver;
//!
//! let receiver = WebhookReceiver::new("your-secret-key");
//!
//! let body = b"...";
//! let signature = "...";
//!
//! match receiver.receive(body, signature) {
//!     Ok(delivery) => println!("{} events", delivery.len()),
//!     Err(e) => println!("reject with {}", e.status_code()),
//! }
//! ```

mod config;
mod delivery;
mod error;
mod event;
mod media;
mod receiver;
mod resolver;
mod signature;

pub use config::{ReceiverConfig, ReceiverConfigBuilder};
pub use delivery::{DeliveryInput, EventDelivery, HookInfo, parse_webhook_event_delivery};
pub use error::{ValidationError, WebhookError};
pub use event::{
    Event, EventType, GENERATED_AT_FORMAT, InvalidGeneratedAt, MediaDeletedPayload, MediaEvent,
    MediaPayload, MediaUpdatedPayload, UnknownEventType, parse_generated_at,
};
pub use media::{MediaInfo, MediaReference, Thumbnail};
pub use receiver::{WebhookHandler, WebhookReceiver};
pub use resolver::resolve_event;
pub use signature::{SIGNATURE_HEX_LEN, compute_signature, headers, verify_signature};

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;
