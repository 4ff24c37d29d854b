use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Profile fields mirrored from the identity provider into `user:{id}`.
///
/// The provider owns the account; this hash only caches what the chat UI
/// needs to render a participant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    /// Avatar URL; empty when the provider only had a generated placeholder.
    #[serde(default)]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn from_hash(id: &str, fields: &HashMap<String, String>) -> Result<Self, StoreError> {
        let malformed = |reason: &str| StoreError::MalformedRecord {
            key: id.to_string(),
            reason: reason.to_string(),
        };

        let name = fields
            .get("name")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| malformed("missing name"))?;

        Ok(Self {
            id: id.to_string(),
            name: name.clone(),
            image: fields.get("image").cloned().unwrap_or_default(),
            email: fields.get("email").cloned(),
        })
    }

    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("id".into(), self.id.clone()),
            ("name".into(), self.name.clone()),
            ("image".into(), self.image.clone()),
        ];
        if let Some(email) = &self.email {
            fields.push(("email".into(), email.clone()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_name() {
        let fields = HashMap::new();
        assert!(UserProfile::from_hash("u1", &fields).is_err());
    }

    #[test]
    fn tolerates_missing_image_and_email() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), "Alice".to_string());
        let profile = UserProfile::from_hash("u1", &fields).unwrap();
        assert_eq!(profile.image, "");
        assert!(profile.email.is_none());
    }
}
