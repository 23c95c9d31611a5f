use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

const KEY_LEN: usize = 16;

type Digest = [u8; blake3::OUT_LEN];

/// Access to the concrete type behind a `dyn Member`
///
/// Implemented for every `'static` type, never by hand.
pub trait AsAny: Any {
    /// Returns the value as `&dyn Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Returns the name of the concrete type
    fn member_type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn member_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// A value that can be stored in a [`Set`](crate::Set)
///
/// `write_identity` feeds the full structural content of the value into the
/// hasher. The concrete type is folded into the identity separately, so an
/// implementation only has to describe the value itself.
///
/// Types that already implement `Hash` can use [`impl_member!`](crate::impl_member):
///
/// ```
/// use sovran_set::{impl_member, set};
///
/// #[derive(Debug, Hash)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// impl_member!(Person);
///
/// let people = set![
///     Person { name: "alice".into(), age: 21 },
///     Person { name: "alice".into(), age: 21 },
/// ];
/// assert_eq!(people.len(), 1);
/// ```
///
/// An implementation must be deterministic. Two structurally equal values that
/// write different bytes are treated as different members.
pub trait Member: AsAny + fmt::Debug + Send + Sync {
    /// Writes the value's structural content into `hasher`
    fn write_identity(&self, hasher: &mut IdentityHasher);
}

/// Collects the bytes that make up a value's identity
///
/// Implements `std::hash::Hasher`, so anything with a `Hash` impl can write
/// itself in with `Hash::hash(value, hasher)`.
#[derive(Clone, Default)]
pub struct IdentityHasher {
    inner: blake3::Hasher,
}

impl IdentityHasher {
    /// Creates an empty hasher
    pub fn new() -> Self {
        Self::default()
    }

    /// A hasher already seeded with the type tag of `T`
    fn tagged<T: Member>() -> Self {
        let mut hasher = Self::new();
        TypeId::of::<T>().hash(&mut hasher);
        type_name::<T>().hash(&mut hasher);
        hasher
    }

    fn digest(&self) -> Digest {
        *self.inner.finalize().as_bytes()
    }

    fn key(&self) -> IdentityKey {
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&self.digest()[..KEY_LEN]);
        IdentityKey(key)
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn finish(&self) -> u64 {
        let mut head = [0u8; 8];
        head.copy_from_slice(&self.digest()[..8]);
        u64::from_le_bytes(head)
    }
}

impl fmt::Debug for IdentityHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityHasher").finish_non_exhaustive()
    }
}

/// The 128-bit identity of a set member
///
/// Derived from the member's concrete type and its structural content. Two
/// values share a key exactly when they have the same type and the same content.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey([u8; KEY_LEN]);

impl IdentityKey {
    /// Derives the identity key of a value
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_set::IdentityKey;
    ///
    /// assert_eq!(IdentityKey::of(&42i32), IdentityKey::of(&42i32));
    /// assert_ne!(IdentityKey::of(&42i32), IdentityKey::of(&42i64));
    /// assert_ne!(IdentityKey::of(&42i32), IdentityKey::of(&"42".to_string()));
    /// ```
    pub fn of<T: Member>(value: &T) -> Self {
        let mut hasher = IdentityHasher::tagged::<T>();
        value.write_identity(&mut hasher);
        hasher.key()
    }

    /// Returns the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({})", self)
    }
}

/// Implements [`Member`](crate::Member) for types whose identity is their `Hash` impl
///
/// Each type must implement `Hash + Debug + Send + Sync + 'static`.
#[macro_export]
macro_rules! impl_member {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Member for $ty {
                fn write_identity(&self, hasher: &mut $crate::IdentityHasher) {
                    ::std::hash::Hash::hash(self, hasher);
                }
            }
        )+
    };
}

impl_member!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String, (),
);

// Every NaN writes the same bits; signed zeros stay distinct.
impl Member for f32 {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        let bits = (if self.is_nan() { f32::NAN } else { *self }).to_bits();
        hasher.write_u32(bits);
    }
}

impl Member for f64 {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        let bits = (if self.is_nan() { f64::NAN } else { *self }).to_bits();
        hasher.write_u64(bits);
    }
}

impl<T: Member> Member for Option<T> {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        match self {
            None => hasher.write_u8(0),
            Some(value) => {
                hasher.write_u8(1);
                value.write_identity(hasher);
            }
        }
    }
}

impl<T: Member> Member for Box<T> {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        (**self).write_identity(hasher);
    }
}

impl<T: Member> Member for Vec<T> {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        write_sequence(hasher, self.iter());
    }
}

impl<T: Member, const N: usize> Member for [T; N] {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        for value in self {
            value.write_identity(hasher);
        }
    }
}

impl<T: Member> Member for BTreeSet<T> {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        write_sequence(hasher, self.iter());
    }
}

impl<K: Member, V: Member> Member for BTreeMap<K, V> {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        hasher.write_u64(self.len() as u64);
        for (key, value) in self {
            key.write_identity(hasher);
            value.write_identity(hasher);
        }
    }
}

impl<T: Member, S: Send + Sync + 'static> Member for HashSet<T, S> {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        write_unordered(
            hasher,
            self.iter().map(|value| digest_with(|h| value.write_identity(h))),
        );
    }
}

impl<K: Member, V: Member, S: Send + Sync + 'static> Member for HashMap<K, V, S> {
    fn write_identity(&self, hasher: &mut IdentityHasher) {
        write_unordered(
            hasher,
            self.iter().map(|(key, value)| {
                digest_with(|h| {
                    key.write_identity(h);
                    value.write_identity(h);
                })
            }),
        );
    }
}

macro_rules! tuple_member {
    ($($name:ident)+) => {
        impl<$($name: Member),+> Member for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write_identity(&self, hasher: &mut IdentityHasher) {
                let ($($name,)+) = self;
                $($name.write_identity(hasher);)+
            }
        }
    };
}

tuple_member!(A);
tuple_member!(A B);
tuple_member!(A B C);
tuple_member!(A B C D);
tuple_member!(A B C D E);
tuple_member!(A B C D E F);

fn write_sequence<'a, T, I>(hasher: &mut IdentityHasher, values: I)
where
    T: Member + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    hasher.write_u64(values.len() as u64);
    for value in values {
        value.write_identity(hasher);
    }
}

fn digest_with(write: impl FnOnce(&mut IdentityHasher)) -> Digest {
    let mut hasher = IdentityHasher::new();
    write(&mut hasher);
    hasher.digest()
}

/// Writes element digests in sorted order so iteration order never leaks into the identity
fn write_unordered(hasher: &mut IdentityHasher, digests: impl Iterator<Item = Digest>) {
    let mut digests: Vec<Digest> = digests.collect();
    digests.sort_unstable();
    hasher.write_u64(digests.len() as u64);
    for digest in &digests {
        hasher.write(digest);
    }
}
