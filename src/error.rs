use thiserror::Error;

/// Errors that can occur when reading values back out of a `Set`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    /// Attempted to read an entry as a type other than the one it was stored with
    #[error("type mismatch: entry holds `{found}`, requested `{expected}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
