//! Opaque ID newtypes for timing model entities.
//!
//! [`InstanceId`], [`PinId`], [`ArcId`], and [`LibertyCellId`] are thin `u32`
//! wrappers used as arena indices into the netlist and library. They are
//! `Copy`, `Hash`, and `Serialize`/`Deserialize`.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a netlist instance.
    InstanceId
);

define_id!(
    /// Opaque, copyable ID for a pin on an instance.
    PinId
);

define_id!(
    /// Opaque, copyable ID for a timing arc between two pins.
    ArcId
);

define_id!(
    /// Opaque, copyable ID for a characterized library cell.
    LibertyCellId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn instance_id_roundtrip() {
        let id = InstanceId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
    }

    #[test]
    fn pin_id_equality() {
        let a = PinId::from_raw(7);
        let b = PinId::from_raw(7);
        let c = PinId::from_raw(8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn arc_id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(ArcId::from_raw(1));
        set.insert(ArcId::from_raw(2));
        set.insert(ArcId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn cell_id_serde_roundtrip() {
        let id = LibertyCellId::from_raw(99);
        let json = serde_json::to_string(&id).unwrap();
        let restored: LibertyCellId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }

    #[test]
    fn id_zero_and_max() {
        let zero = InstanceId::from_raw(0);
        let max = InstanceId::from_raw(u32::MAX);
        assert_eq!(zero.as_raw(), 0);
        assert_eq!(max.as_raw(), u32::MAX);
        assert_ne!(zero, max);
    }
}
