//! # Domain models for showcase projects and sessions
//!
//! Defines the data structures that move between the add-project dialog, the
//! hosted backend and the project grid. Every type is `Serialize + Deserialize`
//! so rows can be decoded straight from the REST responses and sessions can be
//! persisted between page loads.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Project`] | A persisted showcase entry as the views display it. `category` mirrors `type` for older grouping code. |
//! | [`NewProject`] | A [`Project`] handed to the caller after a successful submission, flagged with `is_new_project`. |
//! | [`ProjectRecord`] | The insert payload sent to the `projects` table. |
//! | [`ProjectRow`] | The row the table returns. `id` may be numeric or textual and is normalised to a string. |
//! | [`ProjectType`] | The closed set of declared project types: `website`, `figma`, `other`. |
//! | [`SessionUser`] / [`Session`] | The signed-in user and the bearer token used for backend calls. |
//!
//! ## Helper functions
//!
//! - [`normalize_tags`] turns the raw comma-separated tag input into a trimmed,
//!   non-empty, order-preserving list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Declared kind of a project. Drives preview resolution and grid grouping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Website,
    Figma,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [ProjectType::Website, ProjectType::Figma, ProjectType::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Website => "website",
            ProjectType::Figma => "figma",
            ProjectType::Other => "other",
        }
    }

    /// Label shown in the type selector.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Website => "Website",
            ProjectType::Figma => "Figma",
            ProjectType::Other => "Others",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project type: {0}")]
pub struct UnknownProjectType(pub String);

impl FromStr for ProjectType {
    type Err = UnknownProjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(ProjectType::Website),
            "figma" => Ok(ProjectType::Figma),
            "other" => Ok(ProjectType::Other),
            other => Err(UnknownProjectType(other.to_string())),
        }
    }
}

/// A showcase entry as held in the view's project list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub r#type: ProjectType,
    pub url: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    /// RFC 3339 timestamp as stored by the backend.
    pub created_at: String,
    pub category: ProjectType,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            r#type: row.r#type,
            url: row.url,
            image_url: row.image_url.filter(|u| !u.is_empty()),
            tags: row.tags,
            created_at: row.created_at,
            category: row.r#type,
        }
    }
}

/// A freshly submitted project, passed once to the dialog's caller.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProject {
    pub project: Project,
    pub is_new_project: bool,
}

/// Insert payload for the `projects` table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub r#type: ProjectType,
    pub url: String,
    /// Empty when no image was uploaded.
    pub image_url: String,
    pub tags: Vec<String>,
    pub user_id: String,
    pub created_at: String,
}

/// Row returned by the `projects` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub r#type: ProjectType,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub created_at: String,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The authenticated user as exposed by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionUser {
    /// Email for display, falling back to the user id.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// A signed-in session: the user plus the bearer token for backend calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: SessionUser,
}

/// Split raw tag input on commas, trim each entry and drop the empty ones.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags_drops_blanks_and_keeps_order() {
        assert_eq!(
            normalize_tags("React, , TypeScript ,UI/UX"),
            vec!["React", "TypeScript", "UI/UX"]
        );
        assert!(normalize_tags("").is_empty());
        assert!(normalize_tags(" ,  ,\t,").is_empty());
        assert_eq!(normalize_tags("b,a,b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_project_type_parsing() {
        assert_eq!("figma".parse::<ProjectType>(), Ok(ProjectType::Figma));
        assert_eq!(ProjectType::Other.as_str(), "other");
        assert!("dribbble".parse::<ProjectType>().is_err());
    }

    #[test]
    fn test_row_with_numeric_id_maps_to_project() {
        let row: ProjectRow = serde_json::from_str(
            r#"{
                "id": 42,
                "title": "Portfolio",
                "description": "My site",
                "type": "figma",
                "url": "https://example.com",
                "image_url": "",
                "tags": null,
                "created_at": "2024-05-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        let project = Project::from(row);
        assert_eq!(project.id, "42");
        assert_eq!(project.category, ProjectType::Figma);
        assert!(project.image_url.is_none());
        assert!(project.tags.is_empty());
    }

    #[test]
    fn test_record_serializes_type_lowercase() {
        let record = ProjectRecord {
            title: "t".to_string(),
            description: "d".to_string(),
            r#type: ProjectType::Website,
            url: "https://example.com".to_string(),
            image_url: String::new(),
            tags: vec!["Rust".to_string()],
            user_id: "user-1".to_string(),
            created_at: "2024-05-01T10:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "website");
        assert_eq!(json["image_url"], "");
    }
}
