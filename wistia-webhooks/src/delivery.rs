//! Webhook delivery envelope and parser

use crate::error::ValidationError;
use crate::event::{Event, EventType};
use crate::resolver::resolve_event;
use crate::{Result, WebhookError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

/// The webhook configuration that produced a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HookInfo {
    pub uuid: Uuid,
}

/// One webhook HTTP delivery: a hook reference and its ordered batch of events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDelivery {
    pub hook: HookInfo,

    /// Events in delivery order; may be empty
    pub events: Vec<Event>,
}

impl EventDelivery {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Events with the given tag, in delivery order
    pub fn events_of_type(&self, event_type: EventType) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(move |e| e.event_type() == event_type)
    }

    /// Serialize back to the wire shape
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<'a> IntoIterator for &'a EventDelivery {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl FromStr for EventDelivery {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self> {
        parse_webhook_event_delivery(s)
    }
}

/// Raw input accepted by [`parse_webhook_event_delivery`]
#[derive(Debug, Clone)]
pub enum DeliveryInput<'a> {
    /// JSON text
    Text(&'a str),
    /// Raw request body
    Bytes(&'a [u8]),
    /// Already-decoded JSON
    Json(Cow<'a, Value>),
}

impl<'a> From<&'a str> for DeliveryInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for DeliveryInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for DeliveryInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for DeliveryInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for DeliveryInput<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Value> for DeliveryInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Json(Cow::Borrowed(value))
    }
}

impl From<Value> for DeliveryInput<'_> {
    fn from(value: Value) -> Self {
        Self::Json(Cow::Owned(value))
    }
}

impl From<Map<String, Value>> for DeliveryInput<'_> {
    fn from(map: Map<String, Value>) -> Self {
        Self::Json(Cow::Owned(Value::Object(map)))
    }
}

/// Parse a Wistia webhook delivery.
///
/// Accepts JSON text, raw bytes, or an already-decoded value. Text and bytes
/// that are not well-formed JSON fail with [`WebhookError::Syntax`]; anything
/// that does not match the delivery shape fails with
/// [`WebhookError::Validation`]. One invalid event fails the whole delivery.
///
/// Performs no authentication: check the signature with
/// [`verify_signature`](crate::verify_signature) first.
///
/// ```
/// use wistia_webhooks::parse_webhook_event_delivery;
///
/// let delivery = parse_webhook_event_delivery(
///     r#"{"hook": {"uuid": "a4ab9eb6-ab82-4dae-86f2-29f744f7d031"}, "events": []}"#,
/// )
/// .unwrap();
/// assert!(delivery.is_empty());
/// ```
pub fn parse_webhook_event_delivery<'a>(
    event_data: impl Into<DeliveryInput<'a>>,
) -> Result<EventDelivery> {
    let value: Cow<'a, Value> = match event_data.into() {
        DeliveryInput::Text(text) => Cow::Owned(serde_json::from_str(text)?),
        DeliveryInput::Bytes(bytes) => Cow::Owned(serde_json::from_slice(bytes)?),
        DeliveryInput::Json(value) => value,
    };

    let delivery = validate_delivery(&value)?;
    debug!(
        hook = %delivery.hook.uuid,
        events = delivery.events.len(),
        "Parsed webhook delivery"
    );
    Ok(delivery)
}

fn validate_delivery(value: &Value) -> std::result::Result<EventDelivery, ValidationError> {
    let envelope = value
        .as_object()
        .ok_or_else(|| ValidationError::new("$", "expected an object").with_value(value))?;

    let hook = envelope
        .get("hook")
        .ok_or_else(|| ValidationError::missing("hook"))?;
    let events = envelope
        .get("events")
        .ok_or_else(|| ValidationError::missing("events"))?;

    let hook = parse_hook(hook)?;

    let events = events
        .as_array()
        .ok_or_else(|| ValidationError::new("events", "expected an array").with_value(events))?
        .iter()
        .enumerate()
        .map(|(index, raw)| resolve_event(raw, index))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(EventDelivery { hook, events })
}

fn parse_hook(hook: &Value) -> std::result::Result<HookInfo, ValidationError> {
    let fields = hook
        .as_object()
        .ok_or_else(|| ValidationError::new("hook", "expected an object").with_value(hook))?;
    let uuid = fields
        .get("uuid")
        .ok_or_else(|| ValidationError::missing("hook.uuid"))?;
    let uuid_str = uuid
        .as_str()
        .ok_or_else(|| ValidationError::new("hook.uuid", "expected a string").with_value(uuid))?;

    let uuid = Uuid::try_parse(uuid_str).map_err(|e| {
        ValidationError::new("hook.uuid", format!("invalid UUID ({})", e)).with_value(uuid)
    })?;

    Ok(HookInfo { uuid })
}
