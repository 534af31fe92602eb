use crate::types::SectionKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One section as written in a resources config file.
///
/// Lists keep the distinction between "absent" and "empty": an absent list on
/// the `global` section disables that default, an empty one does not.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResourceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javascript: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_prefix: Option<String>,
}

/// Sections of a single physical resources config file, `global` included.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RawResourceConfig {
    pub sections: BTreeMap<SectionKey, ResourceEntry>,
}

impl RawResourceConfig {
    pub fn global(&self) -> Option<&ResourceEntry> {
        self.sections
            .iter()
            .find_map(|(key, entry)| key.is_global().then_some(entry))
    }

    /// Split into the `global` entry (if any) and the real sections.
    pub fn into_parts(self) -> (Option<ResourceEntry>, BTreeMap<SectionKey, ResourceEntry>) {
        let mut global = None;
        let mut sections = BTreeMap::new();
        for (key, entry) in self.sections {
            if key.is_global() {
                global = Some(entry);
            } else {
                sections.insert(key, entry);
            }
        }
        (global, sections)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// A section after global defaults have been applied.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SectionConfig {
    #[serde(default)]
    pub javascript: Vec<String>,
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_prefix: Option<String>,
}

impl From<ResourceEntry> for SectionConfig {
    fn from(entry: ResourceEntry) -> Self {
        Self {
            javascript: entry.javascript.unwrap_or_default(),
            css: entry.css.unwrap_or_default(),
            dest_prefix: entry.dest_prefix,
        }
    }
}

/// Merged section configs keyed by section, never containing `global`.
pub type MergedResourceConfig = BTreeMap<SectionKey, SectionConfig>;

/// File lists for one section after component composition.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResolvedComponent {
    #[serde(default)]
    pub javascript: Vec<String>,
    #[serde(default)]
    pub css: Vec<String>,
}

impl From<&SectionConfig> for ResolvedComponent {
    fn from(config: &SectionConfig) -> Self {
        Self {
            javascript: config.javascript.clone(),
            css: config.css.clone(),
        }
    }
}

pub type ResolvedComponents = BTreeMap<SectionKey, ResolvedComponent>;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> RawResourceConfig {
        toml::from_str(input).expect("should parse")
    }

    #[test]
    fn parses_sections_and_global() {
        let raw = parse(
            r#"
[global]
javascript = ["vendor/jquery.js"]
css = []

[home]
javascript = ["home.js"]
dest_prefix = "pages/home"

[checkout]
css = ["checkout.css"]
"#,
        );
        assert_eq!(raw.sections.len(), 3);
        let global = raw.global().unwrap();
        assert_eq!(global.javascript.as_deref(), Some(&["vendor/jquery.js".to_owned()][..]));
        assert_eq!(global.css.as_deref(), Some(&[][..]));

        let home = &raw.sections["home"];
        assert_eq!(home.dest_prefix.as_deref(), Some("pages/home"));
        assert!(home.css.is_none());
    }

    #[test]
    fn into_parts_strips_global() {
        let raw = parse(
            r#"
[global]
javascript = ["a.js"]

[foo]
javascript = ["b.js"]
"#,
        );
        let (global, sections) = raw.into_parts();
        assert!(global.is_some());
        assert_eq!(sections.len(), 1);
        assert!(sections.contains_key("foo"));
        assert!(!sections.contains_key("global"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw = parse(
            r#"
[foo]
javascript = ["b.js"]
minify = true
"#,
        );
        assert_eq!(raw.sections["foo"].javascript.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn absent_lists_become_empty_in_section_config() {
        let entry = ResourceEntry {
            javascript: None,
            css: Some(vec!["a.css".to_owned()]),
            dest_prefix: None,
        };
        let config = SectionConfig::from(entry);
        assert!(config.javascript.is_empty());
        assert_eq!(config.css, vec!["a.css"]);
    }

    #[test]
    fn json_sections_parse() {
        let raw: RawResourceConfig =
            serde_json::from_str(r#"{"foo": {"javascript": ["x.js"], "css": ["x.css"]}}"#)
                .unwrap();
        assert_eq!(raw.sections["foo"].css.as_ref().unwrap()[0], "x.css");
        assert!(raw.global().is_none());
    }
}
