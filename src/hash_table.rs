use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::marker::PhantomData;

use crate::bucket::Bucket;
use crate::bucket::VecBucket;
use crate::config::DEFAULT_CAPACITY;
use crate::config::DEFAULT_MAX_LOAD;
use crate::config::TableConfig;
use crate::entry::Entry;
use crate::error::Result;
use crate::error::TableError;
use crate::hash_set::HashSet;
use crate::hasher::DefaultHashBuilder;
use crate::hasher::bucket_index;
use crate::hasher::spread;

/// Bucket-array statistics for inspecting how evenly keys are spread.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of keys stored
    pub populated: usize,
    /// Length of the bucket array
    pub capacity: usize,
    /// Load-factor ceiling
    pub max_load: f64,
    /// Current load factor (populated / capacity)
    pub load_factor: f64,
    /// Number of buckets holding no entries
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Mean chain length over non-empty buckets
    pub mean_chain: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor, ceiling {:.2}%)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0,
            self.max_load * 100.0
        );
        println!(
            "Buckets: {} empty ({:.2}%)",
            self.empty_buckets,
            if self.capacity == 0 {
                0.0
            } else {
                (self.empty_buckets as f64 / self.capacity as f64) * 100.0
            }
        );
        println!(
            "Chains: longest {}, mean {:.02}",
            self.longest_chain, self.mean_chain
        );
    }
}

/// A hash table mapping unique keys to values, resolving collisions by
/// separate chaining.
///
/// The table owns an array of buckets. A key's bucket is picked by hashing it
/// with the table's [`BuildHasher`] `S`, mixing the result down to a 32-bit
/// code (see [`spread`](crate::hasher::spread)) and reducing that code to the
/// array length. Each bucket is a container of type `B` (a `Vec` by default,
/// see [`bucket`](crate::bucket)) scanned linearly on lookup.
///
/// Before every [`put`](Self::put) the table compares `len / capacity` with
/// its maximum load factor; once the ceiling is reached the bucket array is
/// doubled and every entry is rehashed. Capacity never shrinks, and entries
/// cannot be removed individually: [`remove`](Self::remove) always fails with
/// [`TableError::Unsupported`].
///
/// ## Example
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table = HashTable::new();
/// assert_eq!(table.capacity(), 16);
///
/// for i in 0..13 {
///     table.put(i, i * 10);
/// }
///
/// // The thirteenth insert found the table at its 0.75 ceiling and doubled it.
/// assert_eq!(table.capacity(), 32);
/// assert_eq!(table.get(&12), Some(&120));
/// assert!(table.contains_key(&0));
/// ```
pub struct HashTable<K, V, S = DefaultHashBuilder, B = VecBucket<K, V>> {
    buckets: Vec<B>,
    len: usize,
    max_load: f64,
    hash_builder: S,

    _phantom: PhantomData<(K, V)>,
}

impl<K, V, S, B> Clone for HashTable<K, V, S, B>
where
    S: Clone,
    B: Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            max_load: self.max_load,
            hash_builder: self.hash_builder.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<K, V, S, B> Debug for HashTable<K, V, S, B>
where
    K: Debug,
    V: Debug,
    B: Bucket<K, V>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> HashTable<K, V, DefaultHashBuilder, VecBucket<K, V>> {
    /// Creates an empty table with 16 buckets and a 0.75 load-factor ceiling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let table: HashTable<u32, &str> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.max_load(), 0.75);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty table with `capacity` buckets and the default
    /// load-factor ceiling.
    ///
    /// Capacities that are not a power of two are kept as given; such tables
    /// reduce hash codes with a modulo instead of a mask.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let table: HashTable<u32, u32> = HashTable::with_capacity(5).unwrap();
    /// assert_eq!(table.capacity(), 5);
    ///
    /// assert!(HashTable::<u32, u32>::with_capacity(0).is_err());
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Creates an empty table from an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if the configuration does not
    /// [`validate`](TableConfig::validate).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    /// use chain_hash::TableConfig;
    ///
    /// let table: HashTable<u32, u32> =
    ///     HashTable::with_config(TableConfig::new(8, 0.5).unwrap()).unwrap();
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.max_load(), 0.5);
    /// ```
    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, S, B> HashTable<K, V, S, B>
where
    B: Bucket<K, V>,
{
    /// Creates an empty default-sized table using `hash_builder` to hash
    /// keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use chain_hash::HashTable;
    /// # use chain_hash::bucket::ListBucket;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table: HashTable<&str, u32, _, ListBucket<&str, u32>> =
    ///     HashTable::with_hasher(SimpleHasher);
    /// table.put("a", 1);
    /// assert_eq!(table.get(&"a"), Some(&1));
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            buckets: Self::allocate(DEFAULT_CAPACITY),
            len: 0,
            max_load: DEFAULT_MAX_LOAD,
            hash_builder,
            _phantom: PhantomData,
        }
    }

    /// Creates an empty table with `capacity` buckets, the default load-factor
    /// ceiling and the given hasher builder.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `capacity` is zero.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        Self::with_config_and_hasher(TableConfig::with_capacity(capacity)?, hash_builder)
    }

    /// Creates an empty table from an explicit configuration and hasher
    /// builder.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if the configuration does not
    /// [`validate`](TableConfig::validate).
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buckets: Self::allocate(config.capacity),
            len: 0,
            max_load: config.max_load,
            hash_builder,
            _phantom: PhantomData,
        })
    }

    /// Builds `capacity` empty buckets. Every bucket array the table ever
    /// holds comes from here.
    fn allocate(capacity: usize) -> Vec<B> {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, B::default);
        buckets
    }

    /// Returns the number of keys stored in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the length of the bucket array.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the load-factor ceiling fixed at construction.
    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    /// Returns the current load factor, `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the table's current sizing parameters.
    pub fn config(&self) -> TableConfig {
        TableConfig {
            capacity: self.capacity(),
            max_load: self.max_load,
        }
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Drops every entry and restores the default configuration.
    ///
    /// The table comes back with 16 buckets and a 0.75 load-factor ceiling,
    /// whatever capacity and ceiling it was constructed with. The hasher
    /// builder is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    /// use chain_hash::TableConfig;
    ///
    /// let mut table = HashTable::with_config(TableConfig::new(4, 2.0).unwrap()).unwrap();
    /// table.put("a", 1);
    /// table.clear();
    ///
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.max_load(), 0.75);
    /// ```
    pub fn clear(&mut self) {
        self.buckets = Self::allocate(DEFAULT_CAPACITY);
        self.max_load = DEFAULT_MAX_LOAD;
        self.len = 0;
    }

    /// Removing keys is not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`TableError::Unsupported`]; the table is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    /// use chain_hash::TableError;
    ///
    /// let mut table = HashTable::new();
    /// table.put(1, "a");
    /// assert!(matches!(table.remove(&1), Err(TableError::Unsupported(_))));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn remove(&mut self, _key: &K) -> Result<V> {
        Err(TableError::Unsupported("remove"))
    }

    /// Removing a key only when it maps to a given value is not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`TableError::Unsupported`]; the table is left untouched.
    pub fn remove_with_value(&mut self, _key: &K, _value: &V) -> Result<V> {
        Err(TableError::Unsupported("remove with value"))
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.put("a", 1);
    /// table.put("b", 2);
    ///
    /// let mut pairs: Vec<_> = table.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&"a", &1), (&"b", &2)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, B> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// An iterator visiting all keys in arbitrary order.
    pub fn keys(&self) -> Keys<'_, K, V, B> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in arbitrary order.
    pub fn values(&self) -> Values<'_, K, V, B> {
        Values { inner: self.iter() }
    }

    /// Returns the chain-length histogram of the bucket array: index `n` holds
    /// the number of buckets containing exactly `n` entries.
    ///
    /// Available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn bucket_histogram(&self) -> Vec<usize> {
        let mut hist = alloc::vec![0usize; 1];
        for bucket in &self.buckets {
            let chain = bucket.entry_count();
            if chain >= hist.len() {
                hist.resize(chain + 1, 0);
            }
            hist[chain] += 1;
        }
        hist
    }

    /// Returns bucket-array statistics.
    ///
    /// Available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let hist = self.bucket_histogram();
        let empty_buckets = hist[0];
        let occupied = self.capacity() - empty_buckets;

        DebugStats {
            populated: self.len,
            capacity: self.capacity(),
            max_load: self.max_load,
            load_factor: self.load_factor(),
            empty_buckets,
            longest_chain: hist.len() - 1,
            mean_chain: if occupied == 0 {
                0.0
            } else {
                self.len as f64 / occupied as f64
            },
        }
    }

    /// Pretty-prints the chain-length histogram horizontally using stdout.
    ///
    /// Requires the `std` and `stats` features.
    #[cfg(all(feature = "std", any(test, feature = "stats")))]
    pub fn print_bucket_histogram(&self) {
        let hist = self.bucket_histogram();
        let max = *hist.iter().max().unwrap_or(&0);
        if max == 0 {
            println!("bucket histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!(
            "bucket histogram ({} entries, {} buckets):",
            self.len,
            self.capacity()
        );

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let ch = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            bar.extend(ch);
            bar
        };

        for (chain, &count) in hist.iter().enumerate() {
            println!("{:>3} | {} ({})", chain, make_bar(count), count);
        }
    }
}

impl<K, V, S, B> HashTable<K, V, S, B>
where
    K: Hash + Eq,
    S: BuildHasher,
    B: Bucket<K, V>,
{
    /// Maps `key` onto the current bucket array.
    #[inline]
    fn bucket_for(&self, key: &K) -> usize {
        bucket_index(spread(self.hash_builder.hash_one(key)), self.buckets.len())
    }

    /// Inserts a key-value pair, replacing the entry already stored under an
    /// equal key.
    ///
    /// Before inserting, the table doubles its bucket array if the load factor
    /// computed from the current count has reached the ceiling. This check runs
    /// for every call, including ones that overwrite an existing key.
    ///
    /// Returns the value previously stored under the key, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// assert_eq!(table.put(37, "a"), None);
    /// assert_eq!(table.put(37, "b"), Some("a"));
    /// assert_eq!(table.get(&37), Some(&"b"));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.load_factor() >= self.max_load {
            self.resize();
        }

        let index = self.bucket_for(&key);
        let bucket = &mut self.buckets[index];
        let previous = bucket.take_entry(&key);
        bucket.push_entry(Entry::new(key, value));

        match previous {
            Some(entry) => Some(entry.into_parts().1),
            None => {
                self.len += 1;
                None
            }
        }
    }

    /// Checked form of [`put`](Self::put) for callers holding an optional key.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `key` is `None`; nothing is inserted
    /// and no resize happens.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    /// use chain_hash::TableError;
    ///
    /// let mut table = HashTable::new();
    /// assert_eq!(table.try_put(Some("a"), 1), Ok(None));
    /// assert!(matches!(table.try_put(None, 2), Err(TableError::InvalidArgument(_))));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn try_put(&mut self, key: Option<K>, value: V) -> Result<Option<V>> {
        let key = key.ok_or(TableError::InvalidArgument("key passed to put is absent"))?;
        Ok(self.put(key, value))
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.put(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets[self.bucket_for(key)]
            .find_entry(key)
            .map(Entry::value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_for(key);
        self.buckets[index]
            .find_entry_mut(key)
            .map(Entry::value_mut)
    }

    /// Checked form of [`get`](Self::get) for callers holding an optional key.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `key` is `None`.
    pub fn try_get(&self, key: Option<&K>) -> Result<Option<&V>> {
        let key = key.ok_or(TableError::InvalidArgument("key passed to get is absent"))?;
        Ok(self.get(key))
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Checked form of [`contains_key`](Self::contains_key) for callers
    /// holding an optional key.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `key` is `None`.
    pub fn try_contains_key(&self, key: Option<&K>) -> Result<bool> {
        let key = key.ok_or(TableError::InvalidArgument(
            "key passed to contains_key is absent",
        ))?;
        Ok(self.contains_key(key))
    }

    /// Doubles the bucket array and rehashes every entry into it.
    ///
    /// The new array is filled completely before it replaces the old one.
    fn resize(&mut self) {
        let capacity = self.buckets.len() * 2;
        let mut buckets = Self::allocate(capacity);

        for bucket in core::mem::take(&mut self.buckets) {
            for entry in bucket.into_entries() {
                let code = spread(self.hash_builder.hash_one(entry.key()));
                buckets[bucket_index(code, capacity)].push_entry(entry);
            }
        }

        self.buckets = buckets;
    }
}

impl<K, V, S, B> HashTable<K, V, S, B>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
    B: Bucket<K, V>,
{
    /// Returns a snapshot of the stored keys.
    ///
    /// The set owns clones of the keys, so later changes to the table do not
    /// show up in it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.put("a", 1);
    /// table.put("b", 2);
    ///
    /// let keys = table.key_set();
    /// table.put("c", 3);
    ///
    /// assert_eq!(keys.len(), 2);
    /// assert!(keys.contains(&"a"));
    /// assert!(!keys.contains(&"c"));
    /// ```
    pub fn key_set(&self) -> HashSet<K, S> {
        let mut set = HashSet::with_hasher(self.hash_builder.clone());
        set.extend(self.keys().cloned());
        set
    }
}

impl<K, V, S, B> Default for HashTable<K, V, S, B>
where
    S: Default,
    B: Bucket<K, V>,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, B> PartialEq for HashTable<K, V, S, B>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    B: Bucket<K, V>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, B> Eq for HashTable<K, V, S, B>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
    B: Bucket<K, V>,
{
}

impl<K, V, S, B> FromIterator<(K, V)> for HashTable<K, V, S, B>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
    B: Bucket<K, V>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K, V, S, B> Extend<(K, V)> for HashTable<K, V, S, B>
where
    K: Hash + Eq,
    S: BuildHasher,
    B: Bucket<K, V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S, B> IntoIterator for &'a HashTable<K, V, S, B>
where
    B: Bucket<K, V>,
{
    type IntoIter = Iter<'a, K, V, B>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S, B> IntoIterator for HashTable<K, V, S, B>
where
    B: Bucket<K, V>,
{
    type IntoIter = IntoIter<K, V, B>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.len,
            buckets: self.buckets.into_iter(),
            current: None,
        }
    }
}

/// An iterator over the key-value pairs of a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    buckets: core::slice::Iter<'a, B>,
    current: Option<B::Iter<'a>>,
    remaining: usize,
}

impl<'a, K, V, B> Iterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((entry.key(), entry.value()));
            }
            self.current = Some(self.buckets.next()?.entries());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, B> ExactSizeIterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}

/// An iterator over the keys of a [`HashTable`].
///
/// This struct is created by the [`keys`] method on [`HashTable`].
///
/// [`keys`]: HashTable::keys
pub struct Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    inner: Iter<'a, K, V, B>,
}

impl<'a, K, V, B> Iterator for Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator over the values of a [`HashTable`].
///
/// This struct is created by the [`values`] method on [`HashTable`].
///
/// [`values`]: HashTable::values
pub struct Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    inner: Iter<'a, K, V, B>,
}

impl<'a, K, V, B> Iterator for Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An owning iterator over the key-value pairs of a [`HashTable`].
pub struct IntoIter<K, V, B>
where
    B: Bucket<K, V>,
{
    buckets: alloc::vec::IntoIter<B>,
    current: Option<B::IntoEntries>,
    remaining: usize,
}

impl<K, V, B> Iterator for IntoIter<K, V, B>
where
    B: Bucket<K, V>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(entry.into_parts());
            }
            self.current = Some(self.buckets.next()?.into_entries());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B> ExactSizeIterator for IntoIter<K, V, B> where B: Bucket<K, V> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use core::hash::Hasher;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use rand::rngs::SmallRng;
    use siphasher::sip::SipHasher;

    use super::*;
    use crate::bucket::DequeBucket;
    use crate::bucket::ListBucket;

    #[derive(Clone)]
    struct SipHashBuilder {
        k0: u64,
        k1: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap_or(0),
                k1: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    /// Sends every key to the same hash so all entries share one chain.
    #[derive(Clone, Default)]
    struct ConstantHashBuilder;

    struct ConstantHasher;

    impl Hasher for ConstantHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    impl BuildHasher for ConstantHashBuilder {
        type Hasher = ConstantHasher;

        fn build_hasher(&self) -> Self::Hasher {
            ConstantHasher
        }
    }

    type SipTable<K, V> = HashTable<K, V, SipHashBuilder>;

    fn sip_table<K, V>() -> SipTable<K, V> {
        HashTable::with_hasher(SipHashBuilder::default())
    }

    #[test]
    fn default_construction() {
        let table: HashTable<u64, u64> = HashTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.max_load(), 0.75);
        assert_eq!(table.config(), TableConfig::default());
    }

    #[test]
    fn explicit_construction() {
        let table: HashTable<u64, u64> = HashTable::with_capacity(64).unwrap();
        assert_eq!(table.capacity(), 64);
        assert_eq!(table.max_load(), 0.75);

        let table: HashTable<u64, u64> =
            HashTable::with_config(TableConfig::new(7, 1.5).unwrap()).unwrap();
        assert_eq!(table.capacity(), 7);
        assert_eq!(table.max_load(), 1.5);
    }

    #[test]
    fn invalid_construction() {
        assert!(matches!(
            HashTable::<u64, u64>::with_capacity(0),
            Err(TableError::InvalidArgument(_))
        ));
        let bad = TableConfig {
            capacity: 16,
            max_load: 0.0,
        };
        assert!(matches!(
            HashTable::<u64, u64>::with_config(bad),
            Err(TableError::InvalidArgument(_))
        ));
    }

    #[test]
    fn put_and_get() {
        let mut table = sip_table();

        assert_eq!(table.put(1, "hello".to_string()), None);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());

        assert_eq!(table.get(&1), Some(&"hello".to_string()));
        assert_eq!(table.get(&2), None);
        assert!(table.contains_key(&1));
        assert!(!table.contains_key(&2));
    }

    #[test]
    fn overwrite_keeps_size() {
        let mut table = sip_table();
        for (i, value) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
            let previous = table.put("key", value);
            if i == 0 {
                assert_eq!(previous, None);
            } else {
                assert!(previous.is_some());
            }
            assert_eq!(table.len(), 1);
        }
        assert_eq!(table.get(&"key"), Some(&"e"));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table = sip_table();
        table.put(1, String::from("hello"));

        if let Some(value) = table.get_mut(&1) {
            value.push_str(" world");
        }

        assert_eq!(table.get(&1).map(String::as_str), Some("hello world"));
        assert_eq!(table.get_mut(&2), None);
    }

    #[test]
    fn absent_keys_are_rejected() {
        let mut table: SipTable<u64, u64> = sip_table();
        table.put(1, 1);

        assert!(matches!(
            table.try_put(None, 5),
            Err(TableError::InvalidArgument(_))
        ));
        assert!(matches!(
            table.try_get(None),
            Err(TableError::InvalidArgument(_))
        ));
        assert!(matches!(
            table.try_contains_key(None),
            Err(TableError::InvalidArgument(_))
        ));
        assert_eq!(table.len(), 1);

        assert_eq!(table.try_put(Some(2), 20), Ok(None));
        assert_eq!(table.try_get(Some(&2)), Ok(Some(&20)));
        assert_eq!(table.try_contains_key(Some(&3)), Ok(false));
    }

    #[test]
    fn absent_key_does_not_resize() {
        let mut table: SipTable<u64, u64> = sip_table();
        for k in 0..12 {
            table.put(k, k);
        }
        assert_eq!(table.capacity(), 16);
        assert!(table.try_put(None, 0).is_err());
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn remove_is_unsupported() {
        let mut table = sip_table();
        table.put(1, 10);

        assert_eq!(table.remove(&1), Err(TableError::Unsupported("remove")));
        assert_eq!(table.remove(&2), Err(TableError::Unsupported("remove")));
        assert!(matches!(
            table.remove_with_value(&1, &10),
            Err(TableError::Unsupported(_))
        ));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&1), Some(&10));
    }

    #[test]
    fn thirteenth_insert_doubles_default_table() {
        let mut table = sip_table();
        for k in 0..12u64 {
            table.put(k, k * 2);
        }
        assert_eq!(table.capacity(), 16);

        table.put(12, 24);
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.len(), 13);
        for k in 0..13u64 {
            assert_eq!(table.get(&k), Some(&(k * 2)));
        }
    }

    #[test]
    fn overwrite_at_ceiling_still_resizes() {
        let mut table = sip_table();
        for k in 0..12u64 {
            table.put(k, k);
        }
        assert_eq!(table.capacity(), 16);

        table.put(0, 100);
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.len(), 12);
        assert_eq!(table.get(&0), Some(&100));
    }

    #[test]
    fn resize_preserves_associations() {
        let mut table = sip_table();
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let keys: Vec<u64> = (0..2000).map(|_| rng.random()).collect();

        for (i, &k) in keys.iter().enumerate() {
            let before = table.capacity();
            table.put(k, i);
            if table.capacity() != before {
                assert_eq!(table.capacity(), before * 2);
                for (j, &earlier) in keys[..=i].iter().enumerate() {
                    assert!(table.get(&earlier).is_some(), "lost key {j} after resize");
                }
            }
        }

        for (i, k) in keys.iter().enumerate() {
            let expected = keys.iter().rposition(|other| other == k).unwrap();
            assert_eq!(table.get(k), Some(&expected), "key {i}");
        }
    }

    #[test]
    fn load_factor_stays_under_ceiling() {
        let mut table = sip_table();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..5000 {
            let k: u32 = rng.random_range(0..4000);
            table.put(k, ());
            assert!(
                table.load_factor() <= table.max_load(),
                "{} / {} exceeds {}",
                table.len(),
                table.capacity(),
                table.max_load()
            );
        }
    }

    #[test]
    fn capacity_never_shrinks() {
        let mut table = sip_table();
        let mut last = table.capacity();
        for k in 0..1000u32 {
            table.put(k % 300, k);
            assert!(table.capacity() >= last);
            last = table.capacity();
        }
    }

    #[test]
    fn distinct_keys_counted_once() {
        let mut table = sip_table();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut expected = vec![false; 256];
        for _ in 0..2000 {
            let k: u8 = rng.random();
            table.put(k, k as u32);
            expected[k as usize] = true;
        }

        let distinct = expected.iter().filter(|&&seen| seen).count();
        assert_eq!(table.len(), distinct);

        let keys = table.key_set();
        assert_eq!(keys.len(), distinct);
        for (k, &seen) in expected.iter().enumerate() {
            assert_eq!(keys.contains(&(k as u8)), seen);
        }
    }

    #[test]
    fn key_set_is_a_snapshot() {
        let mut table = sip_table();
        for k in 0..10u32 {
            table.put(k, k);
        }
        let keys = table.key_set();
        for k in 10..100u32 {
            table.put(k, k);
        }

        assert_eq!(keys.len(), 10);
        assert!((0..10).all(|k| keys.contains(&k)));
        assert!(!keys.contains(&50));
    }

    #[test]
    fn clear_restores_default_configuration() {
        let mut table: SipTable<u32, u32> = HashTable::with_config_and_hasher(
            TableConfig::new(4, 4.0).unwrap(),
            SipHashBuilder::default(),
        )
        .unwrap();
        for k in 0..40 {
            table.put(k, k);
        }
        assert_eq!(table.capacity(), 16);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.max_load(), 0.75);
        assert!(!table.contains_key(&1));

        // Behaves like a fresh default table: doubles on the thirteenth put.
        for k in 0..12 {
            table.put(k, k);
        }
        assert_eq!(table.capacity(), 16);
        table.put(12, 12);
        assert_eq!(table.capacity(), 32);
    }

    #[test]
    fn non_power_of_two_capacity() {
        let mut table: SipTable<u64, u64> =
            HashTable::with_capacity_and_hasher(5, SipHashBuilder::default()).unwrap();
        for k in 0..100u64 {
            table.put(k, k + 1);
        }
        assert_eq!(table.capacity() % 5, 0);
        assert!((table.capacity() / 5).is_power_of_two());
        for k in 0..100u64 {
            assert_eq!(table.get(&k), Some(&(k + 1)));
        }
    }

    #[test]
    fn capacity_one_table_grows() {
        let mut table: SipTable<u64, u64> =
            HashTable::with_capacity_and_hasher(1, SipHashBuilder::default()).unwrap();
        table.put(1, 1);
        assert_eq!(table.capacity(), 1);
        table.put(2, 2);
        assert_eq!(table.capacity(), 2);
        table.put(3, 3);
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn full_collisions_share_one_chain() {
        let mut table: HashTable<u32, u32, ConstantHashBuilder> =
            HashTable::with_hasher(ConstantHashBuilder);
        for k in 0..100 {
            table.put(k, k * 3);
        }
        for k in 0..100 {
            table.put(k, k * 4);
        }

        assert_eq!(table.len(), 100);
        for k in 0..100 {
            assert_eq!(table.get(&k), Some(&(k * 4)));
        }

        let stats = table.debug_stats();
        assert_eq!(stats.longest_chain, 100);
        assert_eq!(stats.empty_buckets, table.capacity() - 1);
    }

    #[test]
    fn alternative_buckets_behave_alike() {
        let mut vec_table: SipTable<u32, u32> = sip_table();
        let mut list_table: HashTable<u32, u32, SipHashBuilder, ListBucket<u32, u32>> =
            HashTable::with_hasher(SipHashBuilder::default());
        let mut deque_table: HashTable<u32, u32, SipHashBuilder, DequeBucket<u32, u32>> =
            HashTable::with_hasher(SipHashBuilder::default());

        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..1000 {
            let k: u32 = rng.random_range(0..300);
            let v: u32 = rng.random();
            let previous = vec_table.put(k, v);
            assert_eq!(list_table.put(k, v), previous);
            assert_eq!(deque_table.put(k, v), previous);
        }

        assert_eq!(vec_table.len(), list_table.len());
        assert_eq!(vec_table.len(), deque_table.len());
        assert_eq!(vec_table.capacity(), list_table.capacity());
        for (k, v) in vec_table.iter() {
            assert_eq!(list_table.get(k), Some(v));
            assert_eq!(deque_table.get(k), Some(v));
        }
    }

    #[test]
    fn iteration_visits_everything_once() {
        let mut table = sip_table();
        for k in 0..500u32 {
            table.put(k, k * 2);
        }

        let iter = table.iter();
        assert_eq!(iter.len(), 500);

        let mut seen = vec![false; 500];
        for (k, v) in &table {
            assert_eq!(*v, k * 2);
            assert!(!seen[*k as usize]);
            seen[*k as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));

        assert_eq!(table.keys().count(), 500);
        assert_eq!(table.values().map(|&v| v as u64).sum::<u64>(), 249_500);

        let mut owned: Vec<(u32, u32)> = table.into_iter().collect();
        owned.sort_unstable();
        assert_eq!(owned.len(), 500);
        assert_eq!(owned[499], (499, 998));
    }

    #[test]
    fn equality_and_collect() {
        let a: SipTable<u32, u32> = (0..50).map(|k| (k, k)).collect();
        let mut b: SipTable<u32, u32> = (0..50).rev().map(|k| (k, k)).collect();
        assert!(a == b);

        b.put(0, 1);
        assert!(a != b);

        let c = a.clone();
        assert!(a == c);
    }

    #[test]
    fn debug_output() {
        let mut table = sip_table();
        table.put(1, "one");
        assert_eq!(alloc::format!("{:?}", table), r#"{1: "one"}"#);
    }

    #[test]
    fn histogram_counts_every_bucket() {
        let mut table = sip_table();
        for k in 0..100u32 {
            table.put(k, ());
        }
        let hist = table.bucket_histogram();
        assert_eq!(hist.iter().sum::<usize>(), table.capacity());
        let entries: usize = hist.iter().enumerate().map(|(len, n)| len * n).sum();
        assert_eq!(entries, table.len());

        let stats = table.debug_stats();
        assert_eq!(stats.populated, 100);
        assert_eq!(stats.empty_buckets, hist[0]);
        assert!(stats.mean_chain >= 1.0);
    }
}
