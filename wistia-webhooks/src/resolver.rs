//! Event payload variant resolution
//!
//! The `type` tag alone selects the payload shape. `media.created` and
//! `media.ready` payloads are structurally identical, so resolving by trying
//! each shape in turn would be ambiguous.

use crate::error::ValidationError;
use crate::event::{Event, EventType, MediaEvent, UnknownEventType, parse_generated_at};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Resolve and validate one raw event.
///
/// `index` is the event's position in the delivery and is only used to build
/// error paths such as `events[2].payload`.
pub fn resolve_event(raw: &Value, index: usize) -> Result<Event, ValidationError> {
    let path = format!("events[{}]", index);
    let fields = raw
        .as_object()
        .ok_or_else(|| ValidationError::new(&path, "expected an object").with_value(raw))?;

    let uuid = fields.get("uuid").and_then(Value::as_str);
    resolve_fields(fields, &path).map_err(|e| e.with_event_uuid(uuid))
}

fn resolve_fields(fields: &Map<String, Value>, path: &str) -> Result<Event, ValidationError> {
    let event_type = read_event_type(fields, path)?;
    let header = EventHeader::read(fields, path)?;

    let payload_path = format!("{}.payload", path);
    let payload = fields
        .get("payload")
        .ok_or_else(|| ValidationError::missing(&payload_path))?;

    let event = match event_type {
        EventType::MediaCreated => {
            Event::MediaCreated(header.with_payload(decode_payload(payload, &payload_path)?))
        }
        EventType::MediaProcessing => {
            Event::MediaProcessing(header.with_payload(decode_payload(payload, &payload_path)?))
        }
        EventType::MediaReady => {
            Event::MediaReady(header.with_payload(decode_payload(payload, &payload_path)?))
        }
        EventType::MediaFailed => {
            Event::MediaFailed(header.with_payload(decode_payload(payload, &payload_path)?))
        }
        EventType::MediaUpdated => {
            Event::MediaUpdated(header.with_payload(decode_payload(payload, &payload_path)?))
        }
        EventType::MediaDeleted => {
            Event::MediaDeleted(header.with_payload(decode_payload(payload, &payload_path)?))
        }
    };

    Ok(event)
}

fn read_event_type(fields: &Map<String, Value>, path: &str) -> Result<EventType, ValidationError> {
    let tag_path = format!("{}.type", path);
    let tag = fields
        .get("type")
        .ok_or_else(|| ValidationError::missing(&tag_path))?;
    let tag_str = tag
        .as_str()
        .ok_or_else(|| ValidationError::new(&tag_path, "expected a string").with_value(tag))?;

    tag_str.parse().map_err(|e: UnknownEventType| {
        ValidationError::new(&tag_path, e.to_string()).with_value(tag)
    })
}

/// Fields every variant shares, validated before the payload
struct EventHeader {
    uuid: String,
    metadata: Map<String, Value>,
    generated_at: DateTime<Utc>,
}

impl EventHeader {
    fn read(fields: &Map<String, Value>, path: &str) -> Result<Self, ValidationError> {
        let uuid = required_str(fields, "uuid", path)?.to_string();

        let metadata_path = format!("{}.metadata", path);
        let metadata = match fields.get("metadata") {
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                return Err(
                    ValidationError::new(&metadata_path, "expected an object").with_value(other),
                );
            }
            None => return Err(ValidationError::missing(&metadata_path)),
        };

        let raw_generated_at = required_str(fields, "generated_at", path)?;
        let generated_at = parse_generated_at(raw_generated_at).map_err(|e| {
            ValidationError::new(
                format!("{}.generated_at", path),
                format!("invalid timestamp: {}", e),
            )
            .with_value(&Value::from(raw_generated_at))
        })?;

        Ok(Self {
            uuid,
            metadata,
            generated_at,
        })
    }

    fn with_payload<P>(self, payload: P) -> MediaEvent<P> {
        MediaEvent {
            uuid: self.uuid,
            payload,
            metadata: self.metadata,
            generated_at: self.generated_at,
        }
    }
}

fn required_str<'v>(
    fields: &'v Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'v str, ValidationError> {
    let field_path = format!("{}.{}", path, key);
    let value = fields
        .get(key)
        .ok_or_else(|| ValidationError::missing(&field_path))?;
    value
        .as_str()
        .ok_or_else(|| ValidationError::new(&field_path, "expected a string").with_value(value))
}

fn decode_payload<P: DeserializeOwned>(payload: &Value, path: &str) -> Result<P, ValidationError> {
    if !payload.is_object() {
        return Err(ValidationError::new(path, "expected an object").with_value(payload));
    }
    P::deserialize(payload).map_err(|e| ValidationError::new(path, e.to_string()))
}
