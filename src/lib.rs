// Wistia - webhook ingestion and Data API access for Wistia accounts
//
// This library re-exports the member crates behind features: `webhooks`
// (default) for verifying and parsing webhook deliveries, and `client` for
// the async Data API client.

#[cfg(feature = "webhooks")]
pub use wistia_webhooks as webhooks;

#[cfg(feature = "client")]
pub use wistia_client as client;

// Prelude for common imports
pub mod prelude {
    #[cfg(feature = "webhooks")]
    pub use wistia_webhooks::{
        Event, EventDelivery, EventType, MediaInfo, WebhookError, WebhookReceiver,
        parse_webhook_event_delivery, verify_signature,
    };

    #[cfg(feature = "client")]
    pub use wistia_client::{
        CaptionTrack, ClientConfig, ClientError, ListMediasQuery, ListProjectsQuery, Media,
        Project, WistiaClient,
    };
}
