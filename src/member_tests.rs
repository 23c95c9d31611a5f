// src/member_tests.rs
#[cfg(test)]
mod tests {
    use crate::member::{IdentityHasher, IdentityKey, Member};
    use std::collections::{BTreeMap, HashMap, HashSet};
    use std::hash::Hasher;

    #[derive(Debug, Clone, Hash)]
    struct Person {
        name: String,
        age: u32,
    }

    #[derive(Debug, Clone, Hash)]
    struct Pet {
        name: String,
        age: u32,
    }

    crate::impl_member!(Person, Pet);

    // A hand-written impl for a type holding floats
    #[derive(Debug, Clone)]
    struct Point {
        x: f64,
        y: f64,
    }

    impl Member for Point {
        fn write_identity(&self, hasher: &mut IdentityHasher) {
            self.x.write_identity(hasher);
            self.y.write_identity(hasher);
        }
    }

    fn person(name: &str, age: u32) -> Person {
        Person {
            name: name.to_string(),
            age,
        }
    }

    #[test]
    fn test_identity_is_deterministic() {
        assert_eq!(
            IdentityKey::of(&person("vanessa", 30)),
            IdentityKey::of(&person("vanessa", 30))
        );
        assert_eq!(
            IdentityKey::of(&"orange".to_string()),
            IdentityKey::of(&"orange".to_string())
        );
    }

    #[test]
    fn test_identity_separates_content() {
        assert_ne!(
            IdentityKey::of(&person("vanessa", 30)),
            IdentityKey::of(&person("alice", 30))
        );
        assert_ne!(
            IdentityKey::of(&person("alice", 21)),
            IdentityKey::of(&person("alice", 22))
        );
        assert_ne!(IdentityKey::of(&true), IdentityKey::of(&false));
    }

    #[test]
    fn test_identity_separates_types() {
        // Same text once formatted, different types
        assert_ne!(IdentityKey::of(&"123".to_string()), IdentityKey::of(&123i32));
        assert_ne!(IdentityKey::of(&123i32), IdentityKey::of(&123i64));
        assert_ne!(IdentityKey::of(&123u8), IdentityKey::of(&123i8));
        assert_ne!(IdentityKey::of(&1.5f32), IdentityKey::of(&1.5f64));

        // Same fields, different structs
        let pet = Pet {
            name: "rex".to_string(),
            age: 3,
        };
        assert_ne!(IdentityKey::of(&person("rex", 3)), IdentityKey::of(&pet));

        // Wrapping changes the type
        assert_ne!(IdentityKey::of(&5i32), IdentityKey::of(&Some(5i32)));
        assert_ne!(IdentityKey::of(&5i32), IdentityKey::of(&Box::new(5i32)));
    }

    #[test]
    fn test_float_identity() {
        assert_eq!(IdentityKey::of(&f64::NAN), IdentityKey::of(&-f64::NAN));
        assert_eq!(IdentityKey::of(&f32::NAN), IdentityKey::of(&(0.0f32 / 0.0)));
        assert_ne!(IdentityKey::of(&0.0f64), IdentityKey::of(&-0.0f64));
        assert_eq!(IdentityKey::of(&3.04334f64), IdentityKey::of(&3.04334f64));

        let a = Point { x: 1.0, y: 2.0 };
        let b = Point { x: 2.0, y: 1.0 };
        assert_ne!(IdentityKey::of(&a), IdentityKey::of(&b));
        assert_eq!(IdentityKey::of(&a), IdentityKey::of(&a.clone()));
    }

    #[test]
    fn test_sequence_boundaries() {
        let split_early = (vec![1u8], vec![2u8, 3]);
        let split_late = (vec![1u8, 2], vec![3u8]);
        assert_ne!(IdentityKey::of(&split_early), IdentityKey::of(&split_late));

        assert_ne!(IdentityKey::of(&vec![1i32, 2]), IdentityKey::of(&vec![2i32, 1]));
        assert_eq!(IdentityKey::of(&[1i32, 2, 3]), IdentityKey::of(&[1i32, 2, 3]));
        assert_ne!(
            IdentityKey::of(&("ab".to_string(), "c".to_string())),
            IdentityKey::of(&("a".to_string(), "bc".to_string()))
        );
    }

    #[test]
    fn test_hash_collections_ignore_iteration_order() {
        let forward: HashMap<String, i32> = (0..64).map(|i| (format!("key{i}"), i)).collect();
        let backward: HashMap<String, i32> =
            (0..64).rev().map(|i| (format!("key{i}"), i)).collect();
        assert_eq!(IdentityKey::of(&forward), IdentityKey::of(&backward));

        let mut changed = forward.clone();
        changed.insert("key0".to_string(), -1);
        assert_ne!(IdentityKey::of(&forward), IdentityKey::of(&changed));

        let left: HashSet<u64> = (0..100).collect();
        let right: HashSet<u64> = (0..100).rev().collect();
        assert_eq!(IdentityKey::of(&left), IdentityKey::of(&right));

        // Same pairs, map types differ
        let ordered: BTreeMap<String, i32> = forward.clone().into_iter().collect();
        assert_ne!(IdentityKey::of(&forward), IdentityKey::of(&ordered));
    }

    #[test]
    fn test_key_renders_as_hex() {
        let key = IdentityKey::of(&42i32);
        let text = key.to_string();
        assert_eq!(text.len(), 32);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(text, hex::encode(key.as_bytes()));
        assert_eq!(format!("{:?}", key), format!("IdentityKey({})", text));
    }

    #[test]
    fn test_hasher_finish_tracks_input() {
        let mut a = IdentityHasher::new();
        let mut b = IdentityHasher::new();
        a.write(b"apple");
        b.write(b"apple");
        assert_eq!(a.finish(), b.finish());
        b.write(b"!");
        assert_ne!(a.finish(), b.finish());
    }
}
