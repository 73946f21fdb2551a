/// Typed resource identifiers
///
/// Every resource kind has its own id type so a buffer id can never be
/// passed where a program id is expected. `0` is the empty id.

use std::fmt;

/// Raw value of the empty id, never handed out by the store
pub const EMPTY_ID: u64 = 0;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub u64);

        impl $name {
            /// Id that names no resource
            pub const EMPTY: Self = Self(EMPTY_ID);

            /// Whether this is the empty id
            pub fn is_empty(&self) -> bool {
                self.0 == EMPTY_ID
            }

            /// Raw numeric value
            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

resource_id!(
    /// Identifier of a byte buffer
    BufferId, "buffer"
);
resource_id!(
    /// Identifier of a vertex puller table
    VertexPullerId, "vertex_puller"
);
resource_id!(
    /// Identifier of a shader program
    ProgramId, "program"
);
