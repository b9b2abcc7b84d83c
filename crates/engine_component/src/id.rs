//! Identifier types shared by every ECS registry.
//!
//! All identifiers are opaque `u64` newtypes. The value `0` is reserved as the
//! invalid sentinel on every type.
//!
//! Two allocation schemes are used:
//!
//! - **Named** identifiers ([`SystemId`], and
//!   [`ComponentTypeId`](crate::ComponentTypeId)) are the FNV-1a 64-bit hash of
//!   the name, so the same name always yields the same id in any language.
//! - **Instance** identifiers ([`InstanceId`], [`Entity`](crate::Entity)) come
//!   from a single [`IdAllocator`] that only counts upwards. An id is never
//!   handed out twice, so a stale id can always be detected by lookup.

use serde::{Deserialize, Serialize};

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Hash a name with FNV-1a 64-bit.
///
/// ```text
/// hash = 0xcbf29ce484222325
/// for each byte in name.as_bytes():
///     hash = hash XOR byte
///     hash = hash * 0x00000100000001b3
/// ```
#[must_use]
pub const fn fnv1a(name: &str) -> u64 {
    let bytes = name.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Identifies one live component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// The null / invalid instance sentinel.
    pub const INVALID: InstanceId = InstanceId(0);

    /// Returns `true` if this is not the sentinel.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Identifies a registered system. Derived from the system name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(pub u64);

impl SystemId {
    /// The null / invalid system sentinel.
    pub const INVALID: SystemId = SystemId(0);

    /// Compute the id of the system called `name`.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        Self(fnv1a(name))
    }

    /// Returns `true` if this is not the sentinel.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Monotonic allocator for instance and entity identifiers.
///
/// Starts at 1; 0 stays reserved for the sentinels.
#[derive(Debug)]
pub struct IdAllocator {
    next_id: u64,
}

impl IdAllocator {
    /// Creates a new allocator.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocates a fresh raw id.
    pub fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Returns the number of ids handed out so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_empty_is_offset_basis() {
        assert_eq!(fnv1a(""), 0xcbf2_9ce4_8422_2325);
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // Published FNV-1a 64 test vector for "a".
        assert_eq!(fnv1a("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_system_id_from_name_is_stable() {
        assert_eq!(SystemId::from_name("scripts"), SystemId::from_name("scripts"));
        assert_ne!(SystemId::from_name("scripts"), SystemId::from_name("ui"));
    }

    #[test]
    fn test_allocator_never_repeats() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(ids.count(), 3);
    }

    #[test]
    fn test_sentinels_are_invalid() {
        assert!(!InstanceId::INVALID.is_valid());
        assert!(!SystemId::INVALID.is_valid());
        assert!(InstanceId(7).is_valid());
    }
}
