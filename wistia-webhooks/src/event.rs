//! Webhook event types
//!
//! Every event carries a `type` tag, an opaque `uuid`, a `metadata` mapping,
//! a `generated_at` timestamp and a payload whose shape depends on the tag.
//! [`Event`] is closed over the six media tags Wistia sends.

use crate::media::{MediaInfo, MediaReference};
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only accepted format for `generated_at`, always UTC
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Event type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    MediaCreated,
    MediaProcessing,
    MediaReady,
    MediaFailed,
    MediaUpdated,
    MediaDeleted,
}

impl EventType {
    /// Every known event type, in the order Wistia documents them
    pub const ALL: [EventType; 6] = [
        Self::MediaCreated,
        Self::MediaProcessing,
        Self::MediaReady,
        Self::MediaFailed,
        Self::MediaUpdated,
        Self::MediaDeleted,
    ];

    /// The wire tag (e.g. `media.created`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MediaCreated => "media.created",
            Self::MediaProcessing => "media.processing",
            Self::MediaReady => "media.ready",
            Self::MediaFailed => "media.failed",
            Self::MediaUpdated => "media.updated",
            Self::MediaDeleted => "media.deleted",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tag is not one of the known event types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

/// Payload of `media.created`, `media.processing`, `media.ready` and `media.failed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaPayload {
    pub media: MediaInfo,
}

/// Payload of `media.updated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaUpdatedPayload {
    pub media: MediaInfo,

    /// Attribute values before the update; empty when not sent
    #[serde(default)]
    pub previous_attributes: Map<String, Value>,
}

/// Payload of `media.deleted`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDeletedPayload {
    pub media: MediaReference,
}

/// Fields shared by every event, with the variant's payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaEvent<P> {
    /// Opaque event token, not a UUID despite the name
    pub uuid: String,

    pub payload: P,

    /// Free-form metadata; customarily holds `account_id`
    pub metadata: Map<String, Value>,

    #[serde(serialize_with = "serialize_generated_at")]
    pub generated_at: DateTime<Utc>,
}

/// A webhook event, discriminated by its `type` tag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "media.created")]
    MediaCreated(MediaEvent<MediaPayload>),

    #[serde(rename = "media.processing")]
    MediaProcessing(MediaEvent<MediaPayload>),

    #[serde(rename = "media.ready")]
    MediaReady(MediaEvent<MediaPayload>),

    #[serde(rename = "media.failed")]
    MediaFailed(MediaEvent<MediaPayload>),

    #[serde(rename = "media.updated")]
    MediaUpdated(MediaEvent<MediaUpdatedPayload>),

    #[serde(rename = "media.deleted")]
    MediaDeleted(MediaEvent<MediaDeletedPayload>),
}

// The variants hold different payload types, so or-patterns cannot bind them
// to one name.
macro_rules! each_variant {
    ($event:expr, $e:ident => $body:expr) => {
        match $event {
            Event::MediaCreated($e) => $body,
            Event::MediaProcessing($e) => $body,
            Event::MediaReady($e) => $body,
            Event::MediaFailed($e) => $body,
            Event::MediaUpdated($e) => $body,
            Event::MediaDeleted($e) => $body,
        }
    };
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Self::MediaCreated(_) => EventType::MediaCreated,
            Self::MediaProcessing(_) => EventType::MediaProcessing,
            Self::MediaReady(_) => EventType::MediaReady,
            Self::MediaFailed(_) => EventType::MediaFailed,
            Self::MediaUpdated(_) => EventType::MediaUpdated,
            Self::MediaDeleted(_) => EventType::MediaDeleted,
        }
    }

    pub fn uuid(&self) -> &str {
        each_variant!(self, e => &e.uuid)
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        each_variant!(self, e => &e.metadata)
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        each_variant!(self, e => e.generated_at)
    }

    /// Hashed id of the media the event is about
    pub fn media_id(&self) -> &str {
        each_variant!(self, e => &e.payload.media.id)
    }

    /// Full media snapshot, absent for `media.deleted`
    pub fn media(&self) -> Option<&MediaInfo> {
        match self {
            Self::MediaCreated(e)
            | Self::MediaProcessing(e)
            | Self::MediaReady(e)
            | Self::MediaFailed(e) => Some(&e.payload.media),
            Self::MediaUpdated(e) => Some(&e.payload.media),
            Self::MediaDeleted(_) => None,
        }
    }

    /// `metadata.account_id`, when present and a string
    pub fn account_id(&self) -> Option<&str> {
        self.metadata().get("account_id").and_then(Value::as_str)
    }
}

/// Returned when a `generated_at` value is not a valid UTC timestamp in
/// [`GENERATED_AT_FORMAT`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGeneratedAt {
    /// Not exactly `YYYY-MM-DDTHH:MM:SSZ` with zero-padded fields
    #[error("not in YYYY-MM-DDTHH:MM:SSZ form")]
    Shape,

    /// Right shape, but not a real date or time
    #[error("{0}")]
    OutOfRange(#[from] chrono::ParseError),

    #[error("leap seconds are not accepted")]
    LeapSecond,
}

/// Parse a `generated_at` value.
///
/// Only `YYYY-MM-DDTHH:MM:SSZ` is accepted: every field zero-padded, no
/// offsets, no fractional seconds, no surrounding whitespace.
pub fn parse_generated_at(s: &str) -> Result<DateTime<Utc>, InvalidGeneratedAt> {
    if !has_generated_at_shape(s) {
        return Err(InvalidGeneratedAt::Shape);
    }

    let naive = NaiveDateTime::parse_from_str(s, GENERATED_AT_FORMAT)?;
    // chrono stores a `:60` second as nanoseconds past 1_000_000_000
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(InvalidGeneratedAt::LeapSecond);
    }
    Ok(naive.and_utc())
}

fn has_generated_at_shape(s: &str) -> bool {
    const TEMPLATE: &[u8; 20] = b"dddd-dd-ddTdd:dd:ddZ";

    s.len() == TEMPLATE.len()
        && s.bytes().zip(TEMPLATE).all(|(b, &t)| match t {
            b'd' => b.is_ascii_digit(),
            literal => b == literal,
        })
}

fn serialize_generated_at<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&value.format(GENERATED_AT_FORMAT))
}
