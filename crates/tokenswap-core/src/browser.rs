//! Catalog browser view-model.
//!
//! Holds the normalized goods shown by the browser dialog, the search query
//! and the current selection. Confirming returns the selected reference to
//! the caller directly.

use crate::catalog::{CatalogSnapshot, NormalizedItem};
use crate::error::{Result, SwapError};
use crate::reference::OpaqueReference;
use crate::text::slugify;
use serde::Serialize;

/// State behind one open catalog browser.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    items: Vec<NormalizedItem>,
    query: String,
    selected: Option<OpaqueReference>,
}

impl BrowserState {
    pub fn new(items: Vec<NormalizedItem>) -> Self {
        Self {
            items,
            query: String::new(),
            selected: None,
        }
    }

    /// Window title, e.g. `HeroForge® Browser: 12 miniatures available`.
    pub fn title(&self) -> String {
        format!(
            "HeroForge® Browser: {} miniatures available",
            self.items.len()
        )
    }

    pub fn items(&self) -> &[NormalizedItem] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Updates the search query. Matching is a case-insensitive substring
    /// test on the good's name.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Sets the query and returns the goods that match it.
    pub fn filter(&mut self, query: impl Into<String>) -> Vec<&NormalizedItem> {
        self.set_query(query);
        self.visible()
    }

    /// Goods matching the current query, in browser order.
    pub fn visible(&self) -> Vec<&NormalizedItem> {
        let needle = self.query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Selects the good with `id`.
    pub fn select(&mut self, id: &str) -> Result<&OpaqueReference> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| SwapError::not_found("miniature", id))?;
        Ok(self.selected.insert(item.reference()))
    }

    pub fn selected(&self) -> Option<&OpaqueReference> {
        self.selected.as_ref()
    }

    /// Closes the browser, handing the selection back to the caller.
    pub fn confirm(self) -> Result<OpaqueReference> {
        self.selected.ok_or(SwapError::NoSelection)
    }
}

/// One entry of the host's generic model picker list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroListEntry {
    pub display_name: String,
    pub preview: String,
    /// The reference string written into the picked path field.
    pub output: String,
    pub search: String,
    pub is_new: bool,
    pub slug: String,
}

/// Lists every good in `snapshot` for the host's model picker. Empty before
/// the first successful fetch.
pub fn hero_list(snapshot: Option<&CatalogSnapshot>) -> Vec<HeroListEntry> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };

    snapshot
        .goods
        .iter()
        .map(|good| HeroListEntry {
            display_name: good.name.clone(),
            preview: String::new(),
            output: OpaqueReference::new(&good.name, &good.id).to_string(),
            search: good.name.clone(),
            is_new: false,
            slug: slugify(&good.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, Normalizer, SourceType};

    fn state() -> BrowserState {
        let goods = vec![
            CatalogItem::new("1", "Dark Knight", SourceType::User),
            CatalogItem::new("2", "Wizard", SourceType::User),
            CatalogItem::new("3", "Knight Errant", SourceType::Pack).in_pack("Core"),
        ];
        BrowserState::new(Normalizer::default().normalize(&goods))
    }

    #[test]
    fn test_title_counts_goods() {
        assert_eq!(state().title(), "HeroForge® Browser: 3 miniatures available");
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut browser = state();
        assert_eq!(browser.visible().len(), 3);

        browser.set_query("KNIGHT");
        let names: Vec<_> = browser.visible().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Dark Knight", "Knight Errant"]);

        assert!(browser.filter("dragon").is_empty());
        assert_eq!(browser.query(), "dragon");
    }

    #[test]
    fn test_select_and_confirm() {
        let mut browser = state();
        let reference = browser.select("2").unwrap().clone();
        assert_eq!(reference.to_string(), "[HeroForge]{Wizard}{2}");
        assert_eq!(browser.confirm().unwrap(), reference);
    }

    #[test]
    fn test_select_unknown_id() {
        let mut browser = state();
        assert!(browser.select("404").unwrap_err().is_not_found());
        assert!(browser.selected().is_none());
    }

    #[test]
    fn test_confirm_without_selection() {
        let err = state().confirm().unwrap_err();
        assert!(matches!(err, SwapError::NoSelection));
    }

    #[test]
    fn test_hero_list() {
        assert!(hero_list(None).is_empty());

        let snapshot = CatalogSnapshot::new(vec![CatalogItem::new(
            "7",
            "Sir Reginald",
            SourceType::User,
        )]);
        let entries = hero_list(Some(&snapshot));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].output, "[HeroForge]{Sir Reginald}{7}");
        assert_eq!(entries[0].slug, "sir-reginald");
        assert!(!entries[0].is_new);
    }
}
