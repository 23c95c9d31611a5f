//! # sovran-set
//!
//! A thread-safe set of heterogeneous values.
//!
//! `sovran-set` stores values of any number of different types in a single
//! container and deduplicates them by identity: two values are the same member
//! when they have the same concrete type and the same structural content. Typed
//! views pull the members of one exact type back out.
//!
//! ## Key Features
//!
//! - **Structural identity**: members are keyed by a 128-bit BLAKE3 digest of their type and content
//! - **Type-distinct**: `"123"`, `123i32` and `123i64` are three different members
//! - **Thread-safe**: Built on `Arc<Mutex<_>>` and safe to share between threads
//! - **Typed views**: `strings()`, `ints()`, `floats32()` and `floats64()` select by exact type
//! - **Infallible**: no operation returns an error
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_set::set;
//!
//! let set = set![123, false, false, "orange", 3.04334, 123];
//!
//! // The repeated 123 and false collapse
//! assert_eq!(set.len(), 4);
//!
//! assert!(set.has("orange"));
//! assert!(set.has(false));
//!
//! // Text and integers never collide
//! assert!(!set.has("123"));
//!
//! assert_eq!(set.ints(), vec![123]);
//! assert_eq!(set.strings(), vec!["orange".to_string()]);
//! assert_eq!(set.floats64(), vec![3.04334]);
//! assert!(set.floats32().is_empty());
//! ```
//!
//! ### Storing Your Own Types
//!
//! ```rust
//! use sovran_set::{impl_member, Set};
//!
//! #[derive(Debug, Clone, Hash)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl_member!(Person);
//!
//! let persons = vec![
//!     Person { name: "alice".into(), age: 21 },
//!     Person { name: "bob".into(), age: 30 },
//!     Person { name: "luca".into(), age: 22 },
//! ];
//! let set = Set::from_values(persons.clone());
//!
//! assert_eq!(set.len(), 3);
//! assert!(set.contains(&persons[1]));
//!
//! // Entries are type-erased; downcast to read them back
//! let names: Vec<String> = set
//!     .entries()
//!     .iter()
//!     .filter_map(|entry| entry.downcast_ref::<Person>())
//!     .map(|person| person.name.clone())
//!     .collect();
//! assert_eq!(names.len(), 3);
//! ```
//!
//! ### Sharing Between Threads
//!
//! ```rust
//! use sovran_set::Set;
//! use std::thread;
//!
//! let set = Set::new();
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         // Clones share the same storage
//!         let set = set.clone();
//!         thread::spawn(move || set.add((0..100).map(|i| i % 50 + worker * 10)))
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! // Workers overlap on most values; each distinct value is stored once
//! assert_eq!(set.len(), 80);
//! ```
//!
//! ### Joining Sets
//!
//! ```rust
//! use sovran_set::set;
//!
//! let fruit = set!["apple", "orange", "lemon", "banana"];
//! let languages = set!["python", "java", "ruby", "golang", "apple"];
//!
//! // "apple" is already a member
//! assert_eq!(fruit.join(&languages), 4);
//! assert_eq!(fruit.len(), 8);
//! assert!(fruit.has("ruby"));
//! assert_eq!(languages.len(), 5);
//! ```

mod entry;
mod error;
mod member;
mod member_tests;
mod set;

pub use entry::Entry;
pub use error::SetError;
pub use member::{AsAny, IdentityHasher, IdentityKey, Member};
pub use set::Set;

/// Creates a [`Set`] from a list of values of any member types
///
/// ```
/// use sovran_set::set;
///
/// let empty = set![];
/// assert!(empty.is_empty());
///
/// let mixed = set![1, "a", 1.23f32, 4.34];
/// assert_eq!(mixed.len(), 4);
/// ```
#[macro_export]
macro_rules! set {
    () => {
        $crate::Set::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Set::from_values([$($crate::Entry::from($value)),+])
    };
}
