use core::hash::Hasher;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Hasher builder used when none is specified.
        pub type DefaultHashBuilder = core::hash::BuildHasherDefault<FnvHasher>;
    }
}

/// Fowler–Noll–Vo (FNV-1a) hasher.
///
/// Deterministic and unkeyed. It backs [`DefaultHashBuilder`] on targets built
/// without `std` or `foldhash`.
#[derive(Debug, Clone, Copy)]
pub struct FnvHasher {
    hash: u64,
}

impl FnvHasher {
    const OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    /// Creates a hasher seeded with the FNV offset basis.
    pub const fn new() -> Self {
        Self {
            hash: Self::OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.hash ^= *byte as u64;
            self.hash = self.hash.wrapping_mul(Self::PRIME);
        }
    }
}

/// Folds a 64-bit hash into a 32-bit hash code and mixes its high bits into
/// the low bits, which are the only ones a masked bucket index reads.
#[inline]
pub fn spread(hash: u64) -> u32 {
    let h = (hash ^ (hash >> 32)) as u32;
    h ^ (h >> 20) ^ (h >> 12) ^ (h >> 7) ^ (h >> 4)
}

/// Maps a spread hash code onto `0..capacity`.
///
/// Power-of-two capacities are reduced with a mask; any other capacity falls
/// back to a modulo so caller-chosen sizes stay usable.
#[inline]
pub fn bucket_index(code: u32, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    let code = code as usize;
    if capacity.is_power_of_two() {
        code & (capacity - 1)
    } else {
        code % capacity
    }
}
