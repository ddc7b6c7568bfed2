//! Media shapes carried inside webhook event payloads
//!
//! Narrower than the Data API's media record: a webhook only carries the
//! fields below.

use serde::{Deserialize, Serialize};

/// Thumbnail of a media
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Full media snapshot sent with every event except `media.deleted`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Hashed id of the media (e.g. `vpe2p82q64`)
    pub id: String,
    pub name: String,
    pub url: String,
    /// Length in seconds
    pub duration: f64,
    pub thumbnail: Thumbnail,
}

/// Identity of a media that no longer has a full representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_info_requires_all_fields() {
        let partial = serde_json::json!({"id": "vpe2p82q64", "name": "Lenny"});
        assert!(serde_json::from_value::<MediaInfo>(partial).is_err());
    }

    #[test]
    fn test_media_info_rejects_string_duration() {
        let media = serde_json::json!({
            "id": "vpe2p82q64",
            "name": "Lenny Delivers Video!",
            "url": "https://harper.wistia.com/medias/vpe2p82q64",
            "duration": "forty",
            "thumbnail": {"url": "http://embed.wistia.com/a.jpg"}
        });
        assert!(serde_json::from_value::<MediaInfo>(media).is_err());
    }

    #[test]
    fn test_integer_duration_is_accepted() {
        let media = serde_json::json!({
            "id": "vpe2p82q64",
            "name": "Lenny",
            "url": "https://harper.wistia.com/medias/vpe2p82q64",
            "duration": 40,
            "thumbnail": {"url": "http://embed.wistia.com/a.jpg"}
        });
        let media: MediaInfo = serde_json::from_value(media).unwrap();
        assert_eq!(media.duration, 40.0);
    }

    #[test]
    fn test_reference_ignores_extra_fields() {
        let reference: MediaReference =
            serde_json::from_value(serde_json::json!({"id": "f5diqltruh", "name": "gone"}))
                .unwrap();
        assert_eq!(reference.id, "f5diqltruh");
    }
}
