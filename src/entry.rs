use crate::error::SetError;
use crate::member::{IdentityKey, Member};
use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A type-erased set member together with its identity key
///
/// Entries are immutable and cheap to clone: clones share the stored value.
/// Equality and hashing go through the identity key only.
///
/// # Examples
///
/// ```
/// use sovran_set::Entry;
///
/// let entry = Entry::from("apple");
/// assert!(entry.is::<String>());
/// assert_eq!(entry.downcast_ref::<String>().map(String::as_str), Some("apple"));
/// assert_eq!(entry, Entry::new("apple".to_string()));
/// assert_ne!(entry, Entry::from(7));
/// ```
#[derive(Clone)]
pub struct Entry {
    key: IdentityKey,
    value: Arc<dyn Member>,
}

impl Entry {
    /// Wraps a value, deriving its identity key once up front
    pub fn new<T: Member>(value: T) -> Self {
        Self {
            key: IdentityKey::of(&value),
            value: Arc::new(value),
        }
    }

    /// Returns the identity key computed when the entry was built
    pub fn key(&self) -> IdentityKey {
        self.key
    }

    /// Name of the stored value's concrete type
    pub fn type_name(&self) -> &'static str {
        self.member().member_type_name()
    }

    /// Check if the stored value is exactly of type T
    pub fn is<T: Member>(&self) -> bool {
        self.member().as_any().is::<T>()
    }

    /// Get a reference to the stored value if it is of type T
    pub fn downcast_ref<T: Member>(&self) -> Option<&T> {
        self.member().as_any().downcast_ref::<T>()
    }

    /// Returns a clone of the stored value
    ///
    /// # Errors
    ///
    /// Returns `SetError::TypeMismatch` if the stored value is not of type T.
    pub fn downcast<T: Member + Clone>(&self) -> Result<T, SetError> {
        self.downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| SetError::TypeMismatch {
                expected: type_name::<T>(),
                found: self.type_name(),
            })
    }

    fn member(&self) -> &dyn Member {
        &*self.value
    }
}

impl<T: Member> From<T> for Entry {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// String slices are stored as owned `String`s
impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Self::new(value.to_owned())
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.member(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_to_stored_type() {
        let entry = Entry::from(3.04334);
        assert!(entry.is::<f64>());
        assert!(!entry.is::<f32>());
        assert_eq!(entry.downcast::<f64>(), Ok(3.04334));
        assert_eq!(entry.type_name(), "f64");
    }

    #[test]
    fn test_downcast_type_mismatch() {
        let entry = Entry::from(123);
        let err = entry.downcast::<i64>().unwrap_err();
        assert_eq!(
            err,
            SetError::TypeMismatch {
                expected: "i64",
                found: "i32",
            }
        );
        assert_eq!(
            err.to_string(),
            "type mismatch: entry holds `i32`, requested `i64`"
        );
    }

    #[test]
    fn test_str_and_string_are_the_same_member() {
        let borrowed = Entry::from("orange");
        let owned = Entry::from(String::from("orange"));
        assert_eq!(borrowed, owned);
        assert_eq!(borrowed.key(), owned.key());
        assert!(borrowed.is::<String>());
    }

    #[test]
    fn test_clones_share_the_value() {
        let entry = Entry::from(vec![1u8, 2, 3]);
        let clone = entry.clone();
        let a = entry.downcast_ref::<Vec<u8>>().unwrap();
        let b = clone.downcast_ref::<Vec<u8>>().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_debug_shows_the_value() {
        assert_eq!(format!("{:?}", Entry::from("lemon")), "\"lemon\"");
        assert_eq!(format!("{:?}", Entry::from(Some(false))), "Some(false)");
    }
}
