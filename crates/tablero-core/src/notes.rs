use std::collections::BTreeMap;

use serde::Serialize;

use crate::parsing::normalize::clean;
use crate::suggest::CanvasAnalysis;

/// Suggestions the user chose to keep, by section name.
///
/// Kept apart from the canvas itself; adding a note never changes a
/// `CanvasDocument`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnnotationStore {
    notes: BTreeMap<String, String>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the suggestion for `key` out of an analysis.
    ///
    /// Returns false, leaving the store untouched, when there is no
    /// suggestion for that section or it is blank.
    pub fn add_from(&mut self, analysis: &CanvasAnalysis, key: &str) -> bool {
        let Some(text) = analysis
            .section_suggestions
            .get(key)
            .map(|s| clean(s))
            .filter(|s| !s.is_empty())
        else {
            return false;
        };
        self.notes.insert(key.to_string(), text.to_string());
        true
    }

    /// Add every non-blank suggestion; returns how many were stored.
    pub fn add_all(&mut self, analysis: &CanvasAnalysis) -> usize {
        analysis
            .section_suggestions
            .keys()
            .filter(|key| self.add_from(analysis, key))
            .count()
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.notes.remove(key)
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.notes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
