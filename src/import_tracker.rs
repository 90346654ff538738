//! The shared import sink written by the transformer and read once by the
//! emitter.
//!
//! Sources are kept in a `BTreeMap` so lexicographic ordering by source
//! falls out of the map's natural iteration order; specifiers within a
//! source are de-duplicated and sorted at preamble-emission time.

use std::collections::BTreeMap;

use crate::ir::ImportSpecifierIR;

/// Owned by one `PipelineContext`; written by the transformer's reactivity
/// pass (and any pass that needs to reference a runtime symbol), read once
/// by the emitter's preamble phase. Never shared across `transform()` calls.
#[derive(Debug, Default)]
pub struct ImportTracker {
    sources: BTreeMap<String, Vec<ImportSpecifierIR>>,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a specifier import from `source`, rewriting a dialect-file
    /// source path to `.js` and stripping any query string. Idempotent:
    /// recording the same `(source, specifier)` pair twice only ever
    /// contributes one import.
    pub fn add(&mut self, source: &str, specifier: ImportSpecifierIR) {
        let normalized = normalize_source(source);
        self.sources.entry(normalized).or_default().push(specifier);
    }

    pub fn add_named(&mut self, source: &str, imported: &str, local: &str) {
        self.add(source, ImportSpecifierIR::Named { imported: imported.to_string(), local: local.to_string() });
    }

    /// Ensure a single named runtime symbol is imported from `source` under
    /// its own name, without inserting a duplicate if a prior pass already
    /// requested it (e.g. `$REGISTRY` referenced by both component wrapping
    /// and JSX lowering).
    pub fn ensure_named(&mut self, source: &str, name: &str) {
        self.add_named(source, name, name);
    }

    /// Final, de-duplicated, sorted view used by the emitter's preamble.
    /// Type-only specifiers are dropped entirely — never preserved, for this
    /// core target (see DESIGN.md).
    pub fn preamble(&self) -> Vec<(String, Vec<ImportSpecifierIR>)> {
        self.sources
            .iter()
            .filter_map(|(source, specifiers)| {
                let mut kept: Vec<ImportSpecifierIR> = specifiers
                    .iter()
                    .filter(|s| !matches!(s, ImportSpecifierIR::TypeOnly { .. }))
                    .cloned()
                    .collect();
                if kept.is_empty() {
                    return None;
                }
                kept.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
                kept.dedup_by(|a, b| sort_key(a) == sort_key(b));
                Some((source.clone(), kept))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.preamble().is_empty()
    }
}

/// Specifiers within a source sort lexicographically by the local-facing
/// name the emitter prints.
fn sort_key(specifier: &ImportSpecifierIR) -> String {
    match specifier {
        ImportSpecifierIR::Default { local } => local.clone(),
        ImportSpecifierIR::Namespace { local } => local.clone(),
        ImportSpecifierIR::Named { imported, .. } => imported.clone(),
        ImportSpecifierIR::TypeOnly { imported, .. } => imported.clone(),
    }
}

/// Source paths ending in the dialect extension are rewritten to `.js` in
/// emitted imports; query strings on import specifiers are stripped.
pub fn normalize_source(source: &str) -> String {
    let without_query = source.split(['?', '#']).next().unwrap_or(source);
    for ext in [".dialect.tsx", ".dialect.ts", ".dialect"] {
        if let Some(stripped) = without_query.strip_suffix(ext) {
            return format!("{stripped}.js");
        }
    }
    without_query.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_sort_lexicographically() {
        let mut tracker = ImportTracker::new();
        tracker.ensure_named("zebra-runtime", "z");
        tracker.ensure_named("alpha-runtime", "a");
        let preamble = tracker.preamble();
        assert_eq!(preamble[0].0, "alpha-runtime");
        assert_eq!(preamble[1].0, "zebra-runtime");
    }

    #[test]
    fn duplicate_specifiers_collapse_to_one() {
        let mut tracker = ImportTracker::new();
        tracker.ensure_named("runtime", "createSignal");
        tracker.ensure_named("runtime", "createSignal");
        let preamble = tracker.preamble();
        assert_eq!(preamble[0].1.len(), 1);
    }

    #[test]
    fn type_only_specifiers_are_dropped() {
        let mut tracker = ImportTracker::new();
        tracker.add("./types", ImportSpecifierIR::TypeOnly { imported: "Foo".into(), local: "Foo".into() });
        assert!(tracker.is_empty());
    }

    #[test]
    fn dialect_extension_is_rewritten_and_query_stripped() {
        assert_eq!(normalize_source("./widget.dialect?raw"), "./widget.js");
        assert_eq!(normalize_source("./widget.dialect.tsx"), "./widget.js");
        assert_eq!(normalize_source("./plain.js"), "./plain.js");
    }
}
