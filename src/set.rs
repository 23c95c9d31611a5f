use crate::entry::Entry;
use crate::member::{IdentityKey, Member};
use std::collections::hash_map::Entry as Slot;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

type Storage = HashMap<IdentityKey, Entry>;

/// A thread-safe set of heterogeneous values
///
/// Members are deduplicated by their [`IdentityKey`]: two values are the same
/// member when they have the same concrete type and the same structural content.
/// Values of different types never collide, so `"123"` and `123` are distinct.
///
/// Cloning a `Set` gives another handle to the same storage. Use
/// [`Set::snapshot`] for an independent copy.
///
/// # Examples
///
/// ```
/// use sovran_set::set;
///
/// let fruit = set!["apple", "orange", "lemon", "banana"];
/// assert_eq!(fruit.len(), 4);
///
/// // Already present, nothing is added
/// assert_eq!(fruit.add(["apple", "banana"]), 0);
///
/// assert_eq!(fruit.remove(["apple", "orange"]), 2);
/// assert_eq!(fruit.remove(["grapefruit"]), 0);
/// assert_eq!(fruit.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Set {
    entries: Arc<Mutex<Storage>>,
}

impl Set {
    /// Creates a new, empty Set
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty Set with room for at least `capacity` members
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::with_capacity(capacity))),
        }
    }

    /// Creates a Set holding the given values, deduplicated
    ///
    /// Mixed types can be passed as [`Entry`] values, or with the [`set!`](crate::set) macro.
    ///
    /// ```
    /// use sovran_set::{Entry, Set};
    ///
    /// let set = Set::from_values([Entry::from(123), Entry::from(false), Entry::from(123)]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let set = Self::new();
        set.add(values);
        set
    }

    /// Adds values that are not already members
    ///
    /// Returns how many values were newly inserted. Values already present, and
    /// repeats within the same call, are not counted.
    pub fn add<I>(&self, values: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        // Keys are derived before locking so member code never runs under the lock.
        let incoming: Vec<Entry> = values.into_iter().map(Into::into).collect();
        let offered = incoming.len();
        let mut rejected = Vec::new();

        let added = {
            let mut entries = self.lock();
            let before = entries.len();
            for entry in incoming {
                match entries.entry(entry.key()) {
                    Slot::Vacant(slot) => {
                        slot.insert(entry);
                    }
                    Slot::Occupied(_) => rejected.push(entry),
                }
            }
            entries.len() - before
        };

        trace!(offered, added, "added values to set");
        drop(rejected);
        added
    }

    /// Removes the given values if present
    ///
    /// Returns how many members were actually removed.
    pub fn remove<I>(&self, values: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let keys: Vec<IdentityKey> = values.into_iter().map(|value| value.into().key()).collect();

        // Removed members are dropped only after the guard is released.
        let removed: Vec<Entry> = {
            let mut entries = self.lock();
            keys.iter().filter_map(|key| entries.remove(key)).collect()
        };

        trace!(offered = keys.len(), removed = removed.len(), "removed values from set");
        removed.len()
    }

    /// Returns true if a value with the same identity is a member
    ///
    /// ```
    /// use sovran_set::set;
    ///
    /// let set = set!["lemon", 7];
    /// assert!(set.has("lemon"));
    /// assert!(set.has(7));
    /// assert!(!set.has(7u64));
    /// ```
    pub fn has(&self, value: impl Into<Entry>) -> bool {
        self.contains_key(&value.into().key())
    }

    /// Like [`Set::has`], but borrows the value
    pub fn contains<T: Member>(&self, value: &T) -> bool {
        self.contains_key(&IdentityKey::of(value))
    }

    /// Returns true if a member with this identity key is present
    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.lock().contains_key(key)
    }

    /// Returns the number of members
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if the set has no members
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards every member
    pub fn clear(&self) {
        let discarded = std::mem::take(&mut *self.lock());
        trace!(discarded = discarded.len(), "cleared set");
    }

    /// Returns a snapshot of all members, in no particular order
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().values().cloned().collect()
    }

    /// Returns an independent Set holding the current members
    pub fn snapshot(&self) -> Self {
        Self::from_values(self.entries())
    }

    /// Adds every member of `other` that is not already a member of this set
    ///
    /// `other` is read under its own lock, which is released before this set is
    /// locked for writing. The join is atomic for each set on its own but not for
    /// the pair. Joining a set with itself (or a handle sharing its storage) does nothing.
    ///
    /// Returns how many members were newly added.
    pub fn join(&self, other: &Set) -> usize {
        if Arc::ptr_eq(&self.entries, &other.entries) {
            debug!("skipping join of a set with its own storage");
            return 0;
        }
        let incoming = other.entries();
        self.add(incoming)
    }

    /// Snapshot of the members stored as `String`
    pub fn strings(&self) -> Vec<String> {
        self.values_of::<String>()
    }

    /// Snapshot of the members stored as `i32`
    ///
    /// Other integer widths are excluded; no coercion is performed. `i32` is the
    /// type an unsuffixed integer literal gets, so `set![1]` shows up here. Code
    /// ported from Go's pointer-width `int` that stores `isize` or `i64` values
    /// will not see them in this view.
    pub fn ints(&self) -> Vec<i32> {
        self.values_of::<i32>()
    }

    /// Snapshot of the members stored as `f32`
    pub fn floats32(&self) -> Vec<f32> {
        self.values_of::<f32>()
    }

    /// Snapshot of the members stored as `f64`
    pub fn floats64(&self) -> Vec<f64> {
        self.values_of::<f64>()
    }

    fn values_of<T: Member + Clone>(&self) -> Vec<T> {
        self.lock()
            .values()
            .filter_map(|entry| entry.downcast_ref::<T>())
            .cloned()
            .collect()
    }

    // The map is never left half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Storage> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("recovering set storage from a poisoned lock");
            poisoned.into_inner()
        })
    }
}

impl<E: Into<Entry>> FromIterator<E> for Set {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<E: Into<Entry>> Extend<E> for Set {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries();
        f.debug_set().entries(entries.iter()).finish()
    }
}
