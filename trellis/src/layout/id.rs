//! Element identity.
//!
//! Ids are 64-bit hashes. Named ids hash their name with FNV-1a; scoped and
//! automatic ids fold further inputs in with a splitmix64 finalizer, which
//! avoids the structured collisions of a bare XOR.

use std::fmt;
use std::panic::Location;

/// Stable identity of a declared element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Id of the implicit root every frame starts with.
    pub const ROOT: Self = Self(0);

    /// Id derived from a name, stable across frames.
    pub const fn new(name: &str) -> Self {
        Self(hash_str(name))
    }

    /// Id for the `index`-th of several elements sharing `name`.
    pub const fn indexed(name: &str, index: u32) -> Self {
        Self(mix(hash_str(name), index as u64 + 1))
    }

    /// Id for `name` scoped under this id, so reusable components can name
    /// their parts without clashing across instances.
    pub const fn local(self, name: &str) -> Self {
        Self(mix(self.0, hash_str(name)))
    }

    pub const fn local_indexed(self, name: &str, index: u32) -> Self {
        Self(mix(mix(self.0, hash_str(name)), index as u64 + 1))
    }

    /// Id derived from the parent, the declaring call site and the sibling position.
    pub(crate) fn auto(parent: ElementId, location: &Location<'_>, sibling: u32) -> Self {
        let site = mix(
            hash_str(location.file()),
            (location.line() as u64) << 32 | location.column() as u64,
        );
        Self(mix(mix(parent.0, site), sibling as u64 + 1))
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

const fn hash_str(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut hash: u64 = 0xcbf29ce484222325; // FNV offset basis
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x100000001b3); // FNV prime
        i += 1;
    }
    hash
}

const fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b.wrapping_mul(0x9E3779B97F4A7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
