//! Records returned by the Wistia Data API.
//!
//! Decoding is lenient: unknown fields are ignored and anything the API may
//! omit is an `Option` or defaults to empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file rendition attached to a media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Direct-access URL to the asset content.
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Internal asset kind, e.g. `OriginalFile` or `Mp4VideoFile`.
    #[serde(rename = "type")]
    pub asset_type: String,
}

/// Media thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// The project a media lives in, as embedded in media records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub hashed_id: Option<String>,
}

/// A media (video, audio, image or document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Numeric id.
    pub id: u64,
    /// Public id used in URLs and webhook payloads.
    pub hashed_id: String,
    pub name: String,
    /// `Video`, `Image`, `Audio`, `PdfDocument`, ...
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project: Option<ProjectReference>,
    /// Processing progress between 0 and 1.
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    /// Seconds for audio and video, pages for documents.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(rename = "embedCode", default)]
    pub embed_code: Option<String>,
}

/// A project grouping medias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub hashed_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media_count: u64,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub anonymous_can_upload: bool,
    #[serde(default)]
    pub anonymous_can_download: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub public_id: Option<String>,
    /// Only populated by `show_project`.
    #[serde(default)]
    pub medias: Vec<Media>,
}

/// Captions for one language of a media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// ISO-639-2 language code.
    pub language: String,
    /// SRT text. Absent from list responses.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub native_name: Option<String>,
    #[serde(default)]
    pub is_draft: bool,
}
