//! Face names and the values they score.
//!
//! A knucklebone comes to rest on one of four stable sides. Each side has
//! a name (`ventre`, `bassin`, `membres`, `dos`) and an integer value.
//! Names are compared case-insensitively, so `Ventre` and `ventre` refer
//! to the same face.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::MechError;

/// Value assigned to a body that could not be matched to any face.
pub const NO_FACE_VALUE: i32 = 0;

/// Mapping from face name to scored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct FaceValues {
    values: BTreeMap<String, i32>,
}

impl FaceValues {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Add a face, replacing any previous value for the same name.
    pub fn with(mut self, name: &str, value: i32) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a face. Returns the previous value if the name was already present.
    pub fn insert(&mut self, name: &str, value: i32) -> Option<i32> {
        self.values.insert(normalize(name), value)
    }

    /// Look up the value of a face by name.
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.values.get(&normalize(name)).copied()
    }

    /// Returns true if at least one face scores `value`.
    pub fn produces(&self, value: i32) -> bool {
        self.values.values().any(|&v| v == value)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterate over the face names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no faces are defined.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Canonical form of a face name.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl TryFrom<BTreeMap<String, i32>> for FaceValues {
    type Error = MechError;

    fn try_from(raw: BTreeMap<String, i32>) -> Result<Self, Self::Error> {
        let mut faces = Self::new();
        for (name, value) in raw {
            if name.trim().is_empty() {
                return Err(MechError::InvalidConfig("face with empty name".to_string()));
            }
            if faces.insert(&name, value).is_some() {
                return Err(MechError::DuplicateFace(normalize(&name)));
            }
        }
        Ok(faces)
    }
}

impl From<FaceValues> for BTreeMap<String, i32> {
    fn from(faces: FaceValues) -> Self {
        faces.values
    }
}

impl std::fmt::Display for FaceValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(n, v)| format!("{n}={v}")).collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let faces = FaceValues::new().with("Ventre", 3).with("dos", 4);
        assert_eq!(faces.value_of("ventre"), Some(3));
        assert_eq!(faces.value_of("VENTRE"), Some(3));
        assert_eq!(faces.value_of(" Dos "), Some(4));
        assert_eq!(faces.value_of("bassin"), None);
    }

    #[test]
    fn insert_replaces() {
        let mut faces = FaceValues::new();
        assert_eq!(faces.insert("dos", 4), None);
        assert_eq!(faces.insert("DOS", 5), Some(4));
        assert_eq!(faces.len(), 1);
        assert_eq!(faces.value_of("dos"), Some(5));
    }

    #[test]
    fn produces_value() {
        let faces = FaceValues::new().with("bassin", 1).with("membres", 6);
        assert!(faces.produces(1));
        assert!(faces.produces(6));
        assert!(!faces.produces(3));
    }

    #[test]
    fn deserialize_rejects_duplicates_after_normalizing() {
        let err = serde_json::from_str::<FaceValues>(r#"{"dos": 4, "Dos": 5}"#).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn deserialize_rejects_empty_name() {
        let err = serde_json::from_str::<FaceValues>(r#"{" ": 4}"#).unwrap_err();
        assert!(err.to_string().contains("empty name"));
    }

    #[test]
    fn serialize_uses_normalized_names() {
        let faces = FaceValues::new().with("Ventre", 3);
        let json = serde_json::to_string(&faces).unwrap();
        assert_eq!(json, r#"{"ventre":3}"#);
    }

    #[test]
    fn display_lists_faces_in_name_order() {
        let faces = FaceValues::new().with("ventre", 3).with("bassin", 1);
        insta::assert_snapshot!(faces.to_string(), @"bassin=1, ventre=3");
    }
}
