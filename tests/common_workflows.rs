//! Integration tests for common Wistia workflows.
//!
//! A signed delivery arrives, is verified and parsed, and the events drive
//! Data API calls.

use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wistia::client::{ClientConfig, WistiaClient};
use wistia::webhooks::{
    Event, EventType, WebhookError, WebhookReceiver, compute_signature, headers,
};

const SECRET: &str = "webhook-secret";

fn signed_delivery() -> (Vec<u8>, String) {
    let body = serde_json::to_vec(&json!({
        "hook": {"uuid": "a4ab9eb6-ab82-4dae-86f2-29f744f7d031"},
        "events": [
            {
                "uuid": "fc53f8f78b67d04d455029813f8ec1ef",
                "type": "media.ready",
                "payload": {
                    "media": {
                        "id": "vpe2p82q64",
                        "name": "Lenny Delivers Video!",
                        "url": "https://harper.wistia.com/medias/vpe2p82q64",
                        "duration": 40.207,
                        "thumbnail": {"url": "http://embed.wistia.com/deliveries/e96ea382.jpg"}
                    }
                },
                "metadata": {"account_id": "0sxav1wj8o"},
                "generated_at": "2020-03-31T21:56:45Z"
            },
            {
                "uuid": "0b6a0e1c7f3e4a2b9d8c7b6a5f4e3d2c",
                "type": "media.deleted",
                "payload": {"media": {"id": "f5diqltruh"}},
                "metadata": {"account_id": "0sxav1wj8o"},
                "generated_at": "2020-03-31T21:57:02Z"
            }
        ]
    }))
    .unwrap();
    let signature = compute_signature(&body, SECRET);
    (body, signature)
}

// =============================================================================
// Webhook to API
// =============================================================================

#[tokio::test]
async fn test_ready_event_enables_captions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/medias/vpe2p82q64/customizations.json"))
        .and(body_json(json!({"plugin": {"captions-v1": {"onByDefault": false}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = WistiaClient::new(
        ClientConfig::builder()
            .api_password("token")
            .base_url(mock_server.uri())
            .build()
            .unwrap(),
    )
    .unwrap();

    let (body, signature) = signed_delivery();
    let receiver = WebhookReceiver::new(SECRET);
    let request_headers = HashMap::from([("x-wistia-signature".to_string(), signature)]);
    let delivery = receiver
        .receive_from_request(&body, &request_headers)
        .unwrap();

    for event in delivery.events_of_type(EventType::MediaReady) {
        client
            .enable_captions_for_media(event.media_id(), true)
            .await
            .unwrap();
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[test]
fn test_handler_sees_only_matching_events() {
    let (body, signature) = signed_delivery();
    let seen = RefCell::new(Vec::new());

    let receiver = WebhookReceiver::new(SECRET);
    let handler = receiver.handler("media.deleted", |event: &Event| {
        seen.borrow_mut().push(event.media_id().to_string());
        Ok(())
    });

    let handled = handler.handle(&body, &signature).unwrap();

    assert_eq!(handled, 1);
    assert_eq!(seen.into_inner(), vec!["f5diqltruh".to_string()]);
}

#[test]
fn test_request_without_signature_is_rejected() {
    let (body, _) = signed_delivery();
    let receiver = WebhookReceiver::new(SECRET);

    let request_headers = HashMap::from([(headers::USER_AGENT.to_string(), "Wistia".to_string())]);
    let err = receiver
        .receive_from_request(&body, &request_headers)
        .unwrap_err();

    assert!(matches!(err, WebhookError::SignatureMissing));
    assert_eq!(err.status_code(), 401);
}
