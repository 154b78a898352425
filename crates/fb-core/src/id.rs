use crate::model::Schema;
use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Process-wide interner behind `FieldId` and `StepId`.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

macro_rules! interned_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Spur);

        impl $name {
            /// Intern a new string, or return the existing key if already interned.
            pub fn intern(s: &str) -> Self {
                $name(INTERNER.get_or_intern(s))
            }

            /// Look up a key without interning it. `None` means no key with
            /// this spelling has ever been created, so no document can hold it.
            pub fn lookup(s: &str) -> Option<Self> {
                INTERNER.get(s).map($name)
            }

            /// Resolve back to a string slice. Interned strings live for the
            /// rest of the process.
            pub fn as_str(&self) -> &'static str {
                INTERNER.resolve(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::intern(s)
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

interned_key!(
    /// Key of an entry in the schema document (e.g. `email`, `text_1`).
    /// A `Spur` index into the shared interner.
    FieldId
);

interned_key!(
    /// Key of a step in the step index (e.g. `page0`).
    StepId
);

// ─── Allocation ──────────────────────────────────────────────────────────

/// Produce a key derived from `base` that is unused in `schema`.
///
/// Returns `base` itself when free, otherwise the first free `base_N`
/// for N = 1, 2, …. Candidates are probed without interning; only the
/// returned key is interned.
pub fn allocate(base: &str, schema: &Schema) -> FieldId {
    let taken = |candidate: &str| FieldId::lookup(candidate).is_some_and(|id| schema.contains(id));

    if !taken(base) {
        return FieldId::intern(base);
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{base}_{counter}");
        if !taken(&candidate) {
            log::trace!("allocate: `{base}` taken, using `{candidate}`");
            return FieldId::intern(&candidate);
        }
        counter += 1;
    }
}

/// The catalog base of a schema key: one trailing `_<digits>` suffix removed.
///
/// `text_1` → `text`, `text` → `text`, `first_name` → `first_name`.
pub fn base_key(key: &str) -> &str {
    match key.rsplit_once('_') {
        Some((head, digits))
            if !head.is_empty()
                && !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            head
        }
        _ => key,
    }
}

/// The catalog base encoded in a drag payload id: everything before the
/// first underscore (`primaryButton_drag` → `primaryButton`).
pub fn drag_base_key(drag_id: &str) -> &str {
    drag_id.split('_').next().unwrap_or(drag_id)
}
