//! # Wistia Data API client
//!
//! An async client for the parts of the Wistia Data API used to manage
//! projects, medias and captions.
//!
//! ## Features
//!
//! - **Projects and Medias**: list and show, with typed query parameters
//! - **Captions**: list, show, create, update, delete, purchase, and upload
//!   from an SRT file
//! - **Customizations**: read player customizations and toggle the captions
//!   plugin
//! - **Auth**: bearer token (default) or HTTP basic auth as user `api`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wistia_client::{ListMediasQuery, WistiaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads WISTIA_API_PASSWORD
//!     let client = WistiaClient::from_env()?;
//!
//!     let medias = client
//!         .list_medias(&ListMediasQuery::default().media_type("Video"))
//!         .await?;
//!
//!     for media in medias {
//!         println!("{} {}", media.hashed_id, media.name);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod query;
mod schema;

pub use client::{RequestBody, WistiaClient};
pub use config::{
    API_PASSWORD_ENV, AuthScheme, BASE_URL_ENV, ClientConfig, ClientConfigBuilder,
    DEFAULT_BASE_URL,
};
pub use error::{ClientError, Result};
pub use query::{ListMediasQuery, ListProjectsQuery, SortDirection};
pub use schema::{Asset, CaptionTrack, Media, Project, ProjectReference, Thumbnail};
