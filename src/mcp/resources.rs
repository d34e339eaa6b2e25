//! MCP resources.
//!
//! A registry of readable, URI-addressed data sources. Entries are either
//! static (`config://app-version`) or templated (`greeting://{name}`);
//! templated entries extract their parameters through the URI pattern
//! matcher and are advertised via `resources/templates/list`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::pattern::UriTemplate;

/// A resource exposed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// A templated resource exposed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    pub uri_template: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Resource contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Result of resources/list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResourcesResult {
    pub resources: Vec<Resource>,
}

/// Result of resources/templates/list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResourceTemplatesResult {
    pub resource_templates: Vec<ResourceTemplate>,
}

/// Result of resources/read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContents>,
}

/// Produces the text of a resource from its extracted URI parameters.
type ProviderFn = Box<dyn Fn(&HashMap<String, String>) -> Result<String> + Send + Sync>;

struct ResourceEntry {
    template: UriTemplate,
    name: String,
    description: Option<String>,
    mime_type: Option<String>,
    provider: ProviderFn,
}

/// Registry of static and templated resources.
#[derive(Default)]
pub struct ResourceRegistry {
    entries: Vec<ResourceEntry>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the demo resources.
    pub fn with_demo_resources() -> Self {
        let mut registry = Self::new();

        registry.register(
            "config://app-version",
            "app-version",
            Some("The application version"),
            Some("text/plain"),
            |_| Ok("v2.1.0".to_string()),
        );

        registry.register(
            "document://sample",
            "sample-document",
            Some("A sample document for summarization demos"),
            Some("text/plain"),
            |_| {
                Ok(
                    "This is a sample document with some text content that can be summarized."
                        .to_string(),
                )
            },
        );

        registry.register(
            "greeting://{name}",
            "greeting",
            Some("A personalized greeting"),
            Some("text/plain"),
            |params| {
                let name = params
                    .get("name")
                    .ok_or_else(|| Error::Internal("missing name parameter".to_string()))?;
                Ok(format!("Hello, {}!", name))
            },
        );

        registry.register(
            "db://users/{user_id}/email",
            "user-email",
            Some("Email address for a user ID"),
            Some("text/plain"),
            |params| {
                let user_id = params
                    .get("user_id")
                    .ok_or_else(|| Error::Internal("missing user_id parameter".to_string()))?;
                let email = match user_id.as_str() {
                    "123" => "alice@example.com",
                    "456" => "bob@example.com",
                    _ => "not_found@example.com",
                };
                Ok(email.to_string())
            },
        );

        registry
    }

    /// Register a resource.
    ///
    /// The URI may contain `{param}` placeholders; entries with placeholders
    /// are advertised as templates, the rest as plain resources.
    pub fn register<F>(
        &mut self,
        uri: &str,
        name: &str,
        description: Option<&str>,
        mime_type: Option<&str>,
        provider: F,
    ) where
        F: Fn(&HashMap<String, String>) -> Result<String> + Send + Sync + 'static,
    {
        self.entries.push(ResourceEntry {
            template: UriTemplate::parse(uri),
            name: name.to_string(),
            description: description.map(String::from),
            mime_type: mime_type.map(String::from),
            provider: Box::new(provider),
        });
    }

    /// Number of registered entries (static and templated).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// List the static resources.
    pub fn list(&self) -> ListResourcesResult {
        let resources = self
            .entries
            .iter()
            .filter(|e| e.template.is_static())
            .map(|e| Resource {
                uri: e.template.as_str().to_string(),
                name: e.name.clone(),
                description: e.description.clone(),
                mime_type: e.mime_type.clone(),
            })
            .collect();

        ListResourcesResult { resources }
    }

    /// List the templated resources.
    pub fn templates(&self) -> ListResourceTemplatesResult {
        let resource_templates = self
            .entries
            .iter()
            .filter(|e| !e.template.is_static())
            .map(|e| ResourceTemplate {
                uri_template: e.template.as_str().to_string(),
                name: e.name.clone(),
                description: e.description.clone(),
                mime_type: e.mime_type.clone(),
            })
            .collect();

        ListResourceTemplatesResult { resource_templates }
    }

    /// Read the resource matching the given URI.
    pub fn read(&self, uri: &str) -> Result<ReadResourceResult> {
        for entry in &self.entries {
            if let Some(params) = entry.template.matches(uri) {
                let text = (entry.provider)(&params)?;
                return Ok(ReadResourceResult {
                    contents: vec![ResourceContents {
                        uri: uri.to_string(),
                        mime_type: entry.mime_type.clone(),
                        text: Some(text),
                    }],
                });
            }
        }

        Err(Error::ResourceNotFound(uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_registry_lists() {
        let registry = ResourceRegistry::with_demo_resources();

        let resources = registry.list().resources;
        let uris: Vec<_> = resources.iter().map(|r| r.uri.as_str()).collect();
        assert!(uris.contains(&"config://app-version"));
        assert!(uris.contains(&"document://sample"));

        let templates = registry.templates().resource_templates;
        let uris: Vec<_> = templates.iter().map(|t| t.uri_template.as_str()).collect();
        assert!(uris.contains(&"greeting://{name}"));
        assert!(uris.contains(&"db://users/{user_id}/email"));
    }

    #[test]
    fn test_read_static_resource() {
        let registry = ResourceRegistry::with_demo_resources();
        let result = registry.read("config://app-version").unwrap();
        assert_eq!(result.contents[0].text.as_deref(), Some("v2.1.0"));
    }

    #[test]
    fn test_read_templated_resource() {
        let registry = ResourceRegistry::with_demo_resources();

        let result = registry.read("greeting://Alice").unwrap();
        assert_eq!(result.contents[0].text.as_deref(), Some("Hello, Alice!"));

        let result = registry.read("db://users/123/email").unwrap();
        assert_eq!(
            result.contents[0].text.as_deref(),
            Some("alice@example.com")
        );

        let result = registry.read("db://users/999/email").unwrap();
        assert_eq!(
            result.contents[0].text.as_deref(),
            Some("not_found@example.com")
        );
    }

    #[test]
    fn test_read_unknown_uri() {
        let registry = ResourceRegistry::with_demo_resources();
        let err = registry.read("unknown://thing").unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound(_)));
    }

    #[test]
    fn test_percent_encoded_parameter() {
        let registry = ResourceRegistry::with_demo_resources();
        let result = registry.read("greeting://Ada%20Lovelace").unwrap();
        assert_eq!(
            result.contents[0].text.as_deref(),
            Some("Hello, Ada Lovelace!")
        );
    }

    #[test]
    fn test_resource_serialization() {
        let resource = Resource {
            uri: "config://app-version".to_string(),
            name: "app-version".to_string(),
            description: None,
            mime_type: Some("text/plain".to_string()),
        };

        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains("\"mimeType\":\"text/plain\""));
        assert!(!json.contains("description"));
    }

    #[test]
    fn test_template_serialization() {
        let result = ListResourceTemplatesResult {
            resource_templates: vec![ResourceTemplate {
                uri_template: "greeting://{name}".to_string(),
                name: "greeting".to_string(),
                description: None,
                mime_type: None,
            }],
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"resourceTemplates\""));
        assert!(json.contains("\"uriTemplate\":\"greeting://{name}\""));
    }
}
