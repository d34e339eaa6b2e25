//! In-memory pet store.
//!
//! The store owns a map from id to [`Pet`] plus the insertion order of ids,
//! and answers three operations: list, create, and get-by-id. Handlers hold a
//! [`SharedPetStore`] rather than any ambient global state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// Validation message for a missing name or type.
pub const MSG_MISSING_FIELDS: &str = "Name and type are required fields";
/// Validation message for a non-integer age.
pub const MSG_AGE_NOT_INTEGER: &str = "Age must be an integer";
/// Not-found message for an unknown pet id.
pub const MSG_PET_NOT_FOUND: &str = "Pet not found";

/// A pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
}

/// A candidate pet record, as submitted by a caller.
///
/// Every field is optional at the wire level; [`PetStore::create`] enforces
/// the required fields and coerces `age` before anything is stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub age: Option<Value>,
}

impl PetDraft {
    /// Convenience constructor for the required fields.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Set the age field from any JSON value.
    pub fn with_age(mut self, age: Value) -> Self {
        self.age = Some(age);
        self
    }

    /// Set an explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// The in-memory pet collection.
#[derive(Debug, Default)]
pub struct PetStore {
    pets: HashMap<String, Pet>,
    order: Vec<String>,
}

/// Shared handle to a pet store, passed to request handlers.
pub type SharedPetStore = Arc<RwLock<PetStore>>;

impl PetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the demo pets.
    pub fn with_sample_pets() -> Self {
        let mut store = Self::new();
        for pet in [
            Pet {
                id: "1".to_string(),
                name: "Fluffy".to_string(),
                kind: "cat".to_string(),
                age: Some(3),
            },
            Pet {
                id: "2".to_string(),
                name: "Rex".to_string(),
                kind: "dog".to_string(),
                age: Some(5),
            },
            Pet {
                id: "3".to_string(),
                name: "Bubbles".to_string(),
                kind: "fish".to_string(),
                age: Some(1),
            },
        ] {
            store.order.push(pet.id.clone());
            store.pets.insert(pet.id.clone(), pet);
        }
        store
    }

    /// Wrap a store in a shared handle.
    pub fn into_shared(self) -> SharedPetStore {
        Arc::new(RwLock::new(self))
    }

    /// Number of pets in the store.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All pets in insertion order.
    pub fn list(&self) -> Vec<Pet> {
        self.order
            .iter()
            .filter_map(|id| self.pets.get(id))
            .cloned()
            .collect()
    }

    /// Look up a pet by id.
    pub fn get(&self, id: &str) -> Result<Pet> {
        self.pets
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(MSG_PET_NOT_FOUND))
    }

    /// Validate a draft, assign an id if absent, and append the record.
    ///
    /// Validation happens entirely before mutation: a rejected draft leaves
    /// the collection unchanged.
    pub fn create(&mut self, draft: PetDraft) -> Result<Pet> {
        let (name, kind) = match (draft.name, draft.kind) {
            (Some(name), Some(kind)) => (name, kind),
            _ => return Err(Error::validation(MSG_MISSING_FIELDS)),
        };

        let age = match draft.age {
            Some(value) => coerce_age(&value)?,
            None => None,
        };

        let id = match draft.id {
            Some(id) if !id.is_empty() => {
                if self.pets.contains_key(&id) {
                    return Err(Error::validation(format!("Pet id {} already exists", id)));
                }
                id
            }
            _ => self.next_id()?,
        };

        let pet = Pet {
            id: id.clone(),
            name,
            kind,
            age,
        };
        self.order.push(id.clone());
        self.pets.insert(id, pet.clone());
        Ok(pet)
    }

    /// Next id: one more than the largest numeric id present, or "1" when the
    /// store holds no numeric ids. Non-numeric ids are skipped by the scan;
    /// an id at the top of the numeric range makes assignment fail rather
    /// than wrap.
    fn next_id(&self) -> Result<String> {
        let max = self
            .order
            .iter()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .map(|next| next.to_string())
            .ok_or_else(|| Error::validation("No ids left to assign"))
    }
}

/// Coerce a JSON value into an integer age.
///
/// Accepts integer numbers, floats with a zero fraction, and strings that
/// parse as an integer after trimming. `null` counts as absent.
fn coerce_age(value: &Value) -> Result<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
                    _ => Err(Error::validation(MSG_AGE_NOT_INTEGER)),
                }
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::validation(MSG_AGE_NOT_INTEGER)),
        _ => Err(Error::validation(MSG_AGE_NOT_INTEGER)),
    }
}
