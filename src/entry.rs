use core::hash::Hash;
use core::hash::Hasher;

/// A key-value pair stored in a bucket.
///
/// An entry's identity is its key: two entries compare equal when their keys
/// do, whatever their values, and an entry hashes exactly like its key. Buckets
/// locate entries through [`Entry::matches`], never through value comparison.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the value.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Splits the entry into its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Returns `true` if this entry is stored under `key`.
    #[inline]
    pub fn matches(&self, key: &K) -> bool
    where
        K: Eq,
    {
        self.key == *key
    }
}

impl<K: Eq, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.key)
    }
}

impl<K: Eq, V> Eq for Entry<K, V> {}

impl<K: Hash, V> Hash for Entry<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Default)]
    struct SipBuilder;

    impl BuildHasher for SipBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new()
        }
    }

    #[test]
    fn equality_ignores_value() {
        assert_eq!(Entry::new("k", 1), Entry::new("k", 2));
        assert_ne!(Entry::new("k", 1), Entry::new("j", 1));
    }

    #[test]
    fn hash_follows_key() {
        let builder = SipBuilder;
        assert_eq!(
            builder.hash_one(Entry::new(7u64, "seven")),
            builder.hash_one(7u64)
        );
    }

    #[test]
    fn accessors() {
        let mut entry = Entry::new(1, 10);
        assert!(entry.matches(&1));
        assert!(!entry.matches(&2));
        *entry.value_mut() += 5;
        assert_eq!(entry.value(), &15);
        assert_eq!(entry.into_parts(), (1, 15));
    }
}
