//! Opaque ID newtypes for design entities.
//!
//! Each ID is a thin `u32` wrapper that is `Copy`, `Hash`, and
//! `Serialize`/`Deserialize`. [`SignalId`]s are allocated by
//! [`DesignContext::alloc_duid`](crate::DesignContext::alloc_duid) and are
//! unique for the lifetime of the construction context.

use crate::arena::ArenaId;
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

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// The globally unique handle of a signal, assigned at creation and
    /// immutable for the lifetime of the construction context.
    ///
    /// Every leaf wire in the member tree carries exactly one `SignalId`;
    /// the extraction pass keys its path map by it, and the lowered fragment
    /// reports port directions against it.
    SignalId
);

define_id!(
    /// Opaque, copyable ID for a platform pad bundle registered with the
    /// construction context.
    PadId
);
