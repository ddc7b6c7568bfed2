//! Query parameters for list endpoints.

use serde::{Serialize, Serializer};

/// Sort order; sent as `1` (ascending) or `0` (descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl Serialize for SortDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Self::Ascending => 1,
            Self::Descending => 0,
        })
    }
}

/// Parameters for `GET projects.json`.
///
/// Without `sort_by` the API orders by project id and ignores the direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListProjectsQuery {
    pub page: u32,
    pub per_page: u32,
    /// `name`, `created` or `updated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl Default for ListProjectsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 100,
            sort_by: None,
            sort_direction: None,
        }
    }
}

impl ListProjectsQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sort by a field in the given direction.
    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_direction = Some(direction);
        self
    }
}

/// Parameters for `GET medias.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListMediasQuery {
    pub sort_by: String,
    pub sort_direction: SortDirection,
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Default for ListMediasQuery {
    fn default() -> Self {
        Self {
            sort_by: "name".to_string(),
            sort_direction: SortDirection::Ascending,
            page: 1,
            per_page: 100,
            project_id: None,
            name: None,
            media_type: None,
        }
    }
}

impl ListMediasQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = field.into();
        self.sort_direction = direction;
        self
    }

    /// Only medias in this project.
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Only medias with exactly this name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Only medias of this type, e.g. `Video`.
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}
