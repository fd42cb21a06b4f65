//! Typed identifiers.
//!
//! `GoalId` ordering is significant: agents always pursue their
//! lowest-numbered outstanding goal first, and the exit sentinel takes the
//! highest id so it is always last.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident: $inner:ty, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            /// Position in a dense `Vec` keyed by this id.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Id for a dense `Vec` position; `None` if it does not fit.
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                <$inner>::try_from(index).ok().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Creation-order index of an agent.  Also its row in the trace ledger.
    AgentId: u32, "agent"
}

typed_id! {
    /// Index into the goal table.
    GoalId: u16, "goal"
}

typed_id! {
    /// Opaque identifier of the item served at a station.
    ItemId: u16, "item"
}
