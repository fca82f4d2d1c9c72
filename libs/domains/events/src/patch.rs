use serde::{Deserialize, Deserializer};

/// Three-way field update used by partial-update payloads.
///
/// Pair with `#[serde(default)]`: an absent key stays [`Patch::Keep`],
/// `null` becomes [`Patch::Clear`], and any value becomes [`Patch::Set`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Don't change the field.
    #[default]
    Keep,
    /// Clear the field (set to None).
    Clear,
    /// Set the field to a new value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_clear(&self) -> bool {
        matches!(self, Patch::Clear)
    }

    /// The change to a nullable column: `None` means untouched.
    pub fn into_nullable(self) -> Option<Option<T>> {
        match self {
            Patch::Keep => None,
            Patch::Clear => Some(None),
            Patch::Set(v) => Some(Some(v)),
        }
    }

    /// The change to a non-nullable column. [`Patch::Clear`] must have been
    /// rejected before this point; it is treated like `Keep`.
    pub fn into_required(self) -> Option<T> {
        match self {
            Patch::Set(v) => Some(v),
            Patch::Keep | Patch::Clear => None,
        }
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Patch::Clear,
            Some(v) => Patch::Set(v),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Doc {
        #[serde(default)]
        note: Patch<String>,
    }

    #[test]
    fn test_absent_null_and_value() {
        let absent: Doc = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.note, Patch::Keep);

        let null: Doc = serde_json::from_value(json!({"note": null})).unwrap();
        assert_eq!(null.note, Patch::Clear);

        let set: Doc = serde_json::from_value(json!({"note": "hi"})).unwrap();
        assert_eq!(set.note, Patch::Set("hi".to_string()));
    }

    #[test]
    fn test_wrong_type_is_a_decode_error() {
        assert!(serde_json::from_value::<Doc>(json!({"note": 5})).is_err());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Patch::<i32>::Keep.into_nullable(), None);
        assert_eq!(Patch::<i32>::Clear.into_nullable(), Some(None));
        assert_eq!(Patch::Set(3).into_nullable(), Some(Some(3)));
        assert_eq!(Patch::Set(3).into_required(), Some(3));
        assert_eq!(Patch::<i32>::Clear.into_required(), None);
    }
}
