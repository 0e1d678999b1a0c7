//! Applications in the migration inventory.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to another entity by id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Ref {
    pub id: u64,
    pub name: String,
}

impl Ref {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Source repository coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Repository kind, e.g. `git` or `subversion`
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// An application tracked in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maven-style `group:artifact:version` coordinates of a deployed binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_service: Option<Ref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Ref>,
}

/// Placeholder the API stores when no binary coordinates were entered.
const EMPTY_BINARY: &str = "::";

impl Application {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            binary: None,
            repository: None,
            business_service: None,
            tags: Vec::new(),
        }
    }

    /// Identity used by table selection and expansion. Names are unique
    /// across the inventory.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    #[must_use]
    pub fn to_ref(&self) -> Ref {
        Ref::new(self.id, self.name.clone())
    }

    /// Binary coordinates are present and not the empty placeholder.
    #[must_use]
    pub fn is_binary_enabled(&self) -> bool {
        self.binary
            .as_deref()
            .is_some_and(|binary| !binary.is_empty() && binary != EMPTY_BINARY)
    }

    /// A source repository URL is present.
    #[must_use]
    pub fn is_source_code_enabled(&self) -> bool {
        self.repository
            .as_ref()
            .is_some_and(|repo| !repo.url.trim().is_empty())
    }

    #[must_use]
    pub fn business_service_name(&self) -> Option<&str> {
        self.business_service.as_ref().map(|r| r.name.as_str())
    }

    /// Repository kind, if a repository with a URL is configured.
    #[must_use]
    pub fn source_kind(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .filter(|_| self.is_source_code_enabled())
            .map(|repo| repo.kind.as_str())
            .filter(|kind| !kind.is_empty())
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_api_export() {
        let json = r#"{
            "id": 7,
            "name": "inventory",
            "binary": "io.konveyor:inventory:1.0",
            "repository": {"kind": "git", "url": "https://example.com/inv.git"},
            "businessService": {"id": 2, "name": "Retail"},
            "tags": [{"id": 1, "name": "java"}]
        }"#;
        let app: Application = serde_json::from_str(json).expect("valid application");
        assert_eq!(app.business_service_name(), Some("Retail"));
        assert!(app.is_binary_enabled());
        assert!(app.is_source_code_enabled());
        assert_eq!(app.source_kind(), Some("git"));
        assert_eq!(app.tag_names().collect::<Vec<_>>(), vec!["java"]);
    }

    #[test]
    fn test_binary_placeholder_is_not_enabled() {
        let mut app = Application::new(1, "a");
        assert!(!app.is_binary_enabled());
        app.binary = Some("::".into());
        assert!(!app.is_binary_enabled());
        app.binary = Some(String::new());
        assert!(!app.is_binary_enabled());
    }

    #[test]
    fn test_repository_without_url_is_not_source_enabled() {
        let mut app = Application::new(1, "a");
        app.repository = Some(Repository {
            kind: "git".into(),
            ..Repository::default()
        });
        assert!(!app.is_source_code_enabled());
        assert_eq!(app.source_kind(), None);
    }
}
