//! Declarative interface schemas.
//!
//! An [`ApiSpec`] describes the operations of an HTTP API (method, path
//! template, parameters, request fields) so that callable bindings can be
//! generated without hand-written per-operation code. [`petstore_spec`]
//! declares the three pet-store operations.

use serde_json::{json, Value};

use crate::pattern::UriTemplate;

/// HTTP method of a declared operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Type of a declared field or parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
}

impl FieldType {
    fn json_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
        }
    }
}

/// A declared parameter or request-body field.
#[derive(Debug, Clone)]
pub struct ApiField {
    pub name: String,
    pub kind: FieldType,
    pub required: bool,
    pub description: String,
}

impl ApiField {
    pub fn new(
        name: impl Into<String>,
        kind: FieldType,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
            description: description.into(),
        }
    }
}

/// One declared API operation.
#[derive(Debug, Clone)]
pub struct ApiOperation {
    /// Operation id, used as the generated tool name.
    pub id: String,
    pub summary: String,
    pub method: HttpMethod,
    /// Path template with `{param}` placeholders.
    pub path: UriTemplate,
    /// Parameters substituted into the path.
    pub path_params: Vec<ApiField>,
    /// JSON request-body fields (POST operations).
    pub body_fields: Vec<ApiField>,
}

impl ApiOperation {
    /// JSON input schema for the operation, combining path parameters and
    /// body fields into one flat object the way generated bindings expect.
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for field in self.path_params.iter().chain(self.body_fields.iter()) {
            properties.insert(
                field.name.clone(),
                json!({
                    "type": field.kind.json_type(),
                    "description": field.description,
                }),
            );
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// A declared API: a name plus its operations.
#[derive(Debug, Clone)]
pub struct ApiSpec {
    pub title: String,
    pub version: String,
    pub operations: Vec<ApiOperation>,
}

impl ApiSpec {
    /// Find an operation by id.
    pub fn operation(&self, id: &str) -> Option<&ApiOperation> {
        self.operations.iter().find(|op| op.id == id)
    }
}

/// The pet-store interface: listPets, createPet, and getPet.
pub fn petstore_spec() -> ApiSpec {
    ApiSpec {
        title: "Pet Store API".to_string(),
        version: "1.0.0".to_string(),
        operations: vec![
            ApiOperation {
                id: "listPets".to_string(),
                summary: "List all pets".to_string(),
                method: HttpMethod::Get,
                path: UriTemplate::parse("/pets"),
                path_params: vec![],
                body_fields: vec![],
            },
            ApiOperation {
                id: "createPet".to_string(),
                summary: "Create a new pet".to_string(),
                method: HttpMethod::Post,
                path: UriTemplate::parse("/pets"),
                path_params: vec![],
                body_fields: vec![
                    ApiField::new("name", FieldType::String, true, "Name of the pet"),
                    ApiField::new("type", FieldType::String, true, "Kind of animal"),
                    ApiField::new("age", FieldType::Integer, false, "Age in years"),
                ],
            },
            ApiOperation {
                id: "getPet".to_string(),
                summary: "Get a pet by ID".to_string(),
                method: HttpMethod::Get,
                path: UriTemplate::parse("/pets/{petId}"),
                path_params: vec![ApiField::new(
                    "petId",
                    FieldType::String,
                    true,
                    "Identifier of the pet",
                )],
                body_fields: vec![],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_petstore_spec_operations() {
        let spec = petstore_spec();
        assert_eq!(spec.operations.len(), 3);
        assert!(spec.operation("listPets").is_some());
        assert!(spec.operation("createPet").is_some());
        assert!(spec.operation("getPet").is_some());
        assert!(spec.operation("deletePet").is_none());
    }

    #[test]
    fn test_create_pet_schema() {
        let spec = petstore_spec();
        let schema = spec.operation("createPet").unwrap().input_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(schema["properties"]["age"]["type"], "integer");

        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&serde_json::json!("name")));
        assert!(required.contains(&serde_json::json!("type")));
        assert!(!required.contains(&serde_json::json!("age")));
    }

    #[test]
    fn test_get_pet_schema_includes_path_param() {
        let spec = petstore_spec();
        let op = spec.operation("getPet").unwrap();
        assert_eq!(op.method, HttpMethod::Get);
        assert_eq!(op.path.params(), vec!["petId"]);

        let schema = op.input_schema();
        assert_eq!(schema["properties"]["petId"]["type"], "string");
    }
}
