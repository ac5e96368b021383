use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Debug;

use crate::error::DraftError;

/// Backend-assigned integer id shared by every entity
pub type EntityId = u32;

/// Editable field set of an entity. A draft doubles as the create and
/// update request body.
pub trait Draft: Debug + Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Names of required fields that are still empty
    fn missing_fields(&self) -> Vec<&'static str>;

    fn validate(&self) -> Result<(), DraftError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DraftError::MissingFields(missing))
        }
    }
}

/// A backend collection reachable under `/{COLLECTION}/`.
pub trait Resource: Debug + Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    type Draft: Draft;

    /// Path segment under the API base, e.g. `"bloodunits"`
    const COLLECTION: &'static str;

    /// Lower-case noun used in user-facing messages, e.g. `"blood unit"`
    const LABEL: &'static str;

    fn id(&self) -> EntityId;

    /// Pre-fill for the edit form
    fn draft(&self) -> Self::Draft;

    /// Pre-fill for the add form
    fn new_draft(today: NaiveDate) -> Self::Draft;
}

/// Whitespace-only text counts as empty
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Optional id that some endpoints send as a number and others as text.
/// `3`, `"3"`, `""` and `null` are all accepted.
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(EntityId),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse()
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("invalid id: {text:?}")))
            }
        }
    }
}
