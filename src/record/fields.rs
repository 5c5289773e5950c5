//! Field-level edits applied through a record's serialized shape.

use std::fmt;

use serde_json::{Map, Value};

use super::{Record, RecordId};

/// A set of field replacements for `update`. Field names use the record's
/// serialized (wire) names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: Map<String, Value>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field, builder style.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Build a patch from a JSON object.
    pub fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(FieldError::PatchNotObject(kind_of(&other))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Error type for field edits that do not fit the record shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The record has no field with this name.
    UnknownField { collection: String, field: String },
    /// The field exists but does not hold a boolean.
    NotBoolean { collection: String, field: String },
    /// Patches must be JSON objects.
    PatchNotObject(&'static str),
    /// The record does not serialize to a JSON object.
    RecordNotObject { collection: String },
    /// The merged value no longer decodes as the record type.
    Invalid { collection: String, message: String },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::UnknownField { collection, field } => {
                write!(f, "unknown field {}.{}", collection, field)
            }
            FieldError::NotBoolean { collection, field } => {
                write!(f, "field {}.{} is not a boolean", collection, field)
            }
            FieldError::PatchNotObject(kind) => {
                write!(f, "patch must be a JSON object, got {}", kind)
            }
            FieldError::RecordNotObject { collection } => {
                write!(f, "records in {} do not serialize to objects", collection)
            }
            FieldError::Invalid {
                collection,
                message,
            } => write!(f, "invalid field value for {}: {}", collection, message),
        }
    }
}

impl std::error::Error for FieldError {}

fn to_object<R: Record>(record: &R) -> Result<Map<String, Value>, FieldError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(FieldError::RecordNotObject {
            collection: R::COLLECTION.to_string(),
        }),
        Err(e) => Err(FieldError::Invalid {
            collection: R::COLLECTION.to_string(),
            message: e.to_string(),
        }),
    }
}

fn from_object<R: Record>(map: Map<String, Value>, id: RecordId) -> Result<R, FieldError> {
    let mut record: R =
        serde_json::from_value(Value::Object(map)).map_err(|e| FieldError::Invalid {
            collection: R::COLLECTION.to_string(),
            message: e.to_string(),
        })?;
    // The id survives any patch.
    record.set_id(id);
    Ok(record)
}

/// Merge `patch` over `record`; patch values win. Returns the merged record
/// and leaves the input untouched.
pub(crate) fn apply_patch<R: Record>(record: &R, patch: &Patch) -> Result<R, FieldError> {
    let mut map = to_object(record)?;
    for (field, value) in patch.fields() {
        let Some(slot) = map.get_mut(field) else {
            return Err(FieldError::UnknownField {
                collection: R::COLLECTION.to_string(),
                field: field.to_string(),
            });
        };
        *slot = value.clone();
    }
    from_object(map, record.id())
}

/// Flip the boolean `field`, returning the new record and the new value.
pub(crate) fn flip_bool<R: Record>(record: &R, field: &str) -> Result<(R, bool), FieldError> {
    let mut map = to_object(record)?;
    let now = match map.get(field) {
        None => {
            return Err(FieldError::UnknownField {
                collection: R::COLLECTION.to_string(),
                field: field.to_string(),
            })
        }
        Some(Value::Bool(current)) => !current,
        Some(_) => {
            return Err(FieldError::NotBoolean {
                collection: R::COLLECTION.to_string(),
                field: field.to_string(),
            })
        }
    };
    map.insert(field.to_string(), Value::Bool(now));
    let mut flipped: R = from_object(map, record.id())?;
    flipped.on_toggle(field, now);
    Ok((flipped, now))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Task {
        id: RecordId,
        title: String,
        done_today: bool,
        streak: u32,
        category: String,
    }

    impl Record for Task {
        const COLLECTION: &'static str = "tasks";
        const CATEGORIES: &'static [&'static str] = &["全部", "工作"];

        fn id(&self) -> RecordId {
            self.id
        }

        fn set_id(&mut self, id: RecordId) {
            self.id = id;
        }

        fn category(&self) -> &str {
            &self.category
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![self.title.as_str()]
        }

        fn on_toggle(&mut self, field: &str, now: bool) {
            if field == "doneToday" {
                self.streak = if now {
                    self.streak + 1
                } else {
                    self.streak.saturating_sub(1)
                };
            }
        }
    }

    fn task() -> Task {
        Task {
            id: 7,
            title: "Write report".into(),
            done_today: false,
            streak: 0,
            category: "工作".into(),
        }
    }

    #[test]
    fn empty_patch_is_identity() {
        let original = task();
        let merged = apply_patch(&original, &Patch::new()).unwrap();
        assert_eq!(merged, original);
    }

    #[test]
    fn patch_values_win() {
        let patch = Patch::new().set("title", "Ship report");
        let merged = apply_patch(&task(), &patch).unwrap();
        assert_eq!(merged.title, "Ship report");
        assert_eq!(merged.category, "工作");
    }

    #[test]
    fn patch_cannot_change_id() {
        let patch = Patch::new().set("id", 99);
        let merged = apply_patch(&task(), &patch).unwrap();
        assert_eq!(merged.id, 7);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let patch = Patch::new().set("colour", "red");
        let err = apply_patch(&task(), &patch).unwrap_err();
        assert!(matches!(err, FieldError::UnknownField { .. }));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let patch = Patch::new().set("streak", "many");
        let err = apply_patch(&task(), &patch).unwrap_err();
        assert!(matches!(err, FieldError::Invalid { .. }));
    }

    #[test]
    fn patch_from_non_object_fails() {
        let err = Patch::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err, FieldError::PatchNotObject("array"));
    }

    #[test]
    fn flip_runs_toggle_hook() {
        let (on, now) = flip_bool(&task(), "doneToday").unwrap();
        assert!(now);
        assert_eq!(on.streak, 1);

        let (off, now) = flip_bool(&on, "doneToday").unwrap();
        assert!(!now);
        assert_eq!(off.streak, 0);
    }

    #[test]
    fn flip_requires_boolean() {
        let err = flip_bool(&task(), "title").unwrap_err();
        assert!(matches!(err, FieldError::NotBoolean { .. }));
    }
}
