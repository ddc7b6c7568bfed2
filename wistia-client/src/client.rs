//! Wistia Data API client.

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    AuthScheme, CaptionTrack, ClientConfig, ClientError, ListMediasQuery, ListProjectsQuery,
    Media, Project, Result,
};

/// Body sent with a write request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/json`
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

/// Client for the Wistia Data API.
#[derive(Debug, Clone)]
pub struct WistiaClient {
    http_client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl WistiaClient {
    /// Create a client from a configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            http_client,
            config: Arc::new(config),
        })
    }

    /// Create a client configured from `WISTIA_API_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Generic requests
    // =========================================================================

    /// GET a path relative to the API root.
    pub async fn get<T: DeserializeOwned>(&self, rel_path: &str) -> Result<T> {
        self.send(self.request(Method::GET, rel_path)).await
    }

    /// GET with query parameters.
    pub async fn get_with_query<T, Q>(&self, rel_path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, rel_path).query(query))
            .await
    }

    /// POST to a path relative to the API root.
    pub async fn post<T: DeserializeOwned>(&self, rel_path: &str, body: RequestBody) -> Result<T> {
        self.send(with_body(self.request(Method::POST, rel_path), body))
            .await
    }

    /// PUT to a path relative to the API root.
    pub async fn put<T: DeserializeOwned>(&self, rel_path: &str, body: RequestBody) -> Result<T> {
        self.send(with_body(self.request(Method::PUT, rel_path), body))
            .await
    }

    /// DELETE a path relative to the API root.
    pub async fn delete<T: DeserializeOwned>(&self, rel_path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, rel_path)).await
    }

    fn request(&self, method: Method, rel_path: &str) -> RequestBuilder {
        let url = format!(
            "{}{}",
            self.config.base_url,
            rel_path.trim_start_matches('/')
        );
        debug!("Wistia API {} {}", method, url);

        let request = self.http_client.request(method, url);
        match &self.config.auth {
            AuthScheme::Bearer => request.bearer_auth(&self.config.api_password),
            AuthScheme::Basic { user } => request.basic_auth(user, Some(&self.config.api_password)),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Wistia API responded with {}", status);
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                text
            };
            return Err(ClientError::Response {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::from_value(json!({}))?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// List one page of projects.
    pub async fn list_projects(&self, query: &ListProjectsQuery) -> Result<Vec<Project>> {
        self.get_with_query("projects.json", query).await
    }

    /// Show a project, including its medias.
    pub async fn show_project(&self, project_hashed_id: &str) -> Result<Project> {
        self.get(&format!("projects/{}.json", project_hashed_id))
            .await
    }

    // =========================================================================
    // Medias
    // =========================================================================

    /// List one page of medias.
    pub async fn list_medias(&self, query: &ListMediasQuery) -> Result<Vec<Media>> {
        self.get_with_query("medias.json", query).await
    }

    pub async fn show_media(&self, hashed_id: &str) -> Result<Media> {
        self.get(&format!("medias/{}.json", hashed_id)).await
    }

    // =========================================================================
    // Customizations
    // =========================================================================

    /// Player customizations saved for a media.
    pub async fn show_media_customizations(&self, hashed_id: &str) -> Result<Value> {
        self.get(&customizations_path(hashed_id)).await
    }

    /// Turn the captions plugin on or off for a media.
    ///
    /// Disabling sends `null` for the plugin, which removes the saved key.
    pub async fn enable_captions_for_media(&self, hashed_id: &str, enabled: bool) -> Result<Value> {
        let payload = if enabled {
            json!({"plugin": {"captions-v1": {"onByDefault": false}}})
        } else {
            json!({"plugin": {"captions-v1": null}})
        };

        self.put(&customizations_path(hashed_id), RequestBody::Json(payload))
            .await
    }

    // =========================================================================
    // Captions
    // =========================================================================

    pub async fn list_captions(&self, hashed_id: &str) -> Result<Vec<CaptionTrack>> {
        self.get(&format!("medias/{}/captions.json", hashed_id))
            .await
    }

    pub async fn show_captions(&self, hashed_id: &str, language: &str) -> Result<CaptionTrack> {
        self.get(&captions_path(hashed_id, language)).await
    }

    /// Add captions in `language` from SRT text.
    ///
    /// The API answers 400 if the language already has captions.
    pub async fn create_captions(&self, hashed_id: &str, language: &str, text: &str) -> Result<()> {
        ensure_caption_text(text)?;

        let form = vec![
            ("language".to_string(), language.to_string()),
            ("caption_file".to_string(), text.to_string()),
        ];
        let _: Value = self
            .post(
                &format!("medias/{}/captions.json", hashed_id),
                RequestBody::Form(form),
            )
            .await?;

        info!("Created {} captions for media {}", language, hashed_id);
        Ok(())
    }

    /// Replace the captions in `language` with SRT text.
    pub async fn update_captions(&self, hashed_id: &str, language: &str, text: &str) -> Result<()> {
        ensure_caption_text(text)?;

        let form = vec![("caption_file".to_string(), text.to_string())];
        let _: Value = self
            .put(&captions_path(hashed_id, language), RequestBody::Form(form))
            .await?;

        info!("Updated {} captions for media {}", language, hashed_id);
        Ok(())
    }

    pub async fn delete_captions(&self, hashed_id: &str, language: &str) -> Result<()> {
        let _: Value = self.delete(&captions_path(hashed_id, language)).await?;
        Ok(())
    }

    /// Order professional English captions for a media.
    pub async fn purchase_captions(&self, hashed_id: &str) -> Result<()> {
        let _: Value = self
            .post(
                &format!("medias/{}/captions/purchase.json", hashed_id),
                RequestBody::Empty,
            )
            .await?;
        Ok(())
    }

    /// Upload an SRT file as the captions for `language`.
    ///
    /// With `replace`, an existing track for the language is updated in
    /// place; otherwise a new track is created.
    pub async fn upload_subtitle_file(
        &self,
        hashed_id: &str,
        path: impl AsRef<Path>,
        replace: bool,
        language: &str,
    ) -> Result<()> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;

        let existing = self.list_captions(hashed_id).await?;
        let has_track = existing.iter().any(|track| track.language == language);

        if replace && has_track {
            self.update_captions(hashed_id, language, &text).await
        } else {
            self.create_captions(hashed_id, language, &text).await
        }
    }
}

fn with_body(request: RequestBuilder, body: RequestBody) -> RequestBuilder {
    match body {
        RequestBody::Empty => request,
        RequestBody::Json(value) => request.json(&value),
        RequestBody::Form(fields) => request.form(&fields),
    }
}

fn customizations_path(hashed_id: &str) -> String {
    format!("medias/{}/customizations.json", hashed_id)
}

fn captions_path(hashed_id: &str, language: &str) -> String {
    format!("medias/{}/captions/{}.json", hashed_id, language)
}

fn ensure_caption_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(ClientError::InvalidArgument(
            "caption text must not be empty".to_string(),
        ));
    }
    Ok(())
}
