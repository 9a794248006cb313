use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner shared by every canvas identifier.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Monotonic counter behind generated ids (`rect_0`, `conn_1`, ...).
static COUNTER: AtomicU64 = AtomicU64::new(0);

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident, $sigil:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Spur);

        impl $name {
            /// Intern a string as an id, or return the existing one.
            pub fn intern(s: &str) -> Self {
                Self(INTERNER.get_or_intern(s))
            }

            /// Resolve back to a string slice.
            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }

            /// Generate a fresh id with a readable prefix (e.g. `rect_4`).
            pub fn with_prefix(prefix: &str) -> Self {
                let n = COUNTER.fetch_add(1, Ordering::Relaxed);
                Self::intern(&format!("{prefix}_{n}"))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($sigil, "{}"), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::intern(&s))
            }
        }
    };
}

interned_id!(
    /// Identifier of a canvas node. 4 bytes, `Copy`, O(1) `Eq`/`Hash`.
    NodeId,
    "#"
);

interned_id!(
    /// Identifier of a connection between two nodes.
    ConnectionId,
    "~"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("card_1");
        let b = NodeId::intern("card_1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "card_1");
    }

    #[test]
    fn generated_ids_are_unique_across_kinds() {
        let a = NodeId::with_prefix("rect");
        let b = NodeId::with_prefix("rect");
        let c = ConnectionId::with_prefix("rect");
        assert_ne!(a, b);
        assert_ne!(a.as_str(), c.as_str());
        assert_ne!(b.as_str(), c.as_str());
        assert!(a.as_str().starts_with("rect_"));
    }

    #[test]
    fn debug_uses_sigil() {
        assert_eq!(format!("{:?}", NodeId::intern("n")), "#n");
        assert_eq!(format!("{:?}", ConnectionId::intern("c")), "~c");
    }
}
