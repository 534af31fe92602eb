//! Newtype wrappers for the string identifiers that flow through a build.
//!
//! All newtypes serialize/deserialize as plain strings so config files and the
//! lock file stay plain JSON/TOML maps.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Reserved section key that carries defaults instead of naming a bundle.
pub const GLOBAL_SECTION: &str = "global";

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Return the inner string as a slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// Name of one resource section inside a resources config (anything but `global`).
    SectionKey
);

string_newtype!(
    /// Fully-qualified manifest key: `{controller_prefix}/{section}`.
    BundleKey
);

string_newtype!(
    /// 32-character lowercase hex cache-busting key embedded in destination names.
    CacheKey
);

impl SectionKey {
    /// Whether this key is the reserved defaults section.
    pub fn is_global(&self) -> bool {
        self.0 == GLOBAL_SECTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn section_key_display_and_as_ref() {
        let key = SectionKey::new("checkout");
        assert_eq!(key.to_string(), "checkout");
        assert_eq!(key.as_str(), "checkout");
        assert_eq!(AsRef::<str>::as_ref(&key), "checkout");
    }

    #[test]
    fn global_key_is_detected() {
        assert!(SectionKey::from("global").is_global());
        assert!(!SectionKey::from("Global").is_global());
        assert!(!SectionKey::from("home").is_global());
    }

    #[test]
    fn bundle_key_serializes_as_plain_string() {
        let key = BundleKey::new("bundles/home");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"bundles/home\"");
        let back: BundleKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(SectionKey::new("home"), 1);
        assert_eq!(map.get("home"), Some(&1));
    }

    #[test]
    fn cache_key_into_inner() {
        let h = CacheKey::new("0123abcd".to_owned());
        assert_eq!(h.into_inner(), "0123abcd");
    }
}
