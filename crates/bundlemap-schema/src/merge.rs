//! Applies `global` defaults to resource sections.

use crate::resource::{MergedResourceConfig, ResourceEntry, SectionConfig};
use crate::types::SectionKey;
use std::collections::HashSet;

/// Ordered union: `first` then `second`, keeping the first occurrence of each entry.
pub fn union_ordered(first: &[String], second: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(first.len() + second.len());
    first
        .iter()
        .chain(second)
        .filter(|file| seen.insert(file.as_str()))
        .cloned()
        .collect()
}

/// Merge one section against the active global defaults.
///
/// With no global the section passes through. With a global, each list is
/// taken from the global (if the section has none) or unioned global-first;
/// a list the global does not define at all comes out empty.
pub fn merge_section(global: Option<&ResourceEntry>, section: ResourceEntry) -> SectionConfig {
    let Some(global) = global else {
        return SectionConfig::from(section);
    };

    SectionConfig {
        javascript: merge_list(global.javascript.as_deref(), section.javascript.as_deref()),
        css: merge_list(global.css.as_deref(), section.css.as_deref()),
        dest_prefix: section.dest_prefix,
    }
}

fn merge_list(global: Option<&[String]>, own: Option<&[String]>) -> Vec<String> {
    match (global, own) {
        (None, _) => Vec::new(),
        (Some(global), None) => global.to_vec(),
        (Some(global), Some(own)) => union_ordered(global, own),
    }
}

/// Merge every section against the same global, dropping any `global` key.
pub fn merge_sections<I>(global: Option<&ResourceEntry>, sections: I) -> MergedResourceConfig
where
    I: IntoIterator<Item = (SectionKey, ResourceEntry)>,
{
    sections
        .into_iter()
        .filter(|(key, _)| !key.is_global())
        .map(|(key, entry)| (key, merge_section(global, entry)))
        .collect()
}
