//! The full set of known images and their per-image selection flags.

use tracing::debug;

use crate::manifest::ManifestEntry;

/// One image known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Stable unique identifier; the manifest name.
    pub id: String,
    pub url: String,
    pub selected: bool,
}

/// Ordered collection of [`ImageEntry`] values, sorted by name at load time.
///
/// Entries are never removed individually; the catalog is only replaced
/// wholesale by [`Catalog::load`]. Ids are unique.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ImageEntry>,
}

impl Catalog {
    /// Build a catalog from an external listing, replacing any prior content.
    ///
    /// Entries are sorted by name (case-insensitive, raw name as tiebreaker)
    /// and all start selected. Duplicate names keep the first occurrence.
    pub fn load(listing: Vec<ManifestEntry>) -> Self {
        let mut entries: Vec<ImageEntry> = listing
            .into_iter()
            .map(|e| ImageEntry {
                id: e.name,
                url: e.url,
                selected: true,
            })
            .collect();
        entries.sort_by(|a, b| {
            a.id.to_lowercase()
                .cmp(&b.id.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        let before = entries.len();
        entries.dedup_by(|b, a| a.id == b.id);
        if entries.len() < before {
            debug!(dropped = before - entries.len(), "duplicate names in listing");
        }
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// The selected subset, in catalog order.
    #[must_use]
    pub fn selection(&self) -> Vec<&ImageEntry> {
        self.entries.iter().filter(|e| e.selected).collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    /// Toggle one entry's selection flag.
    ///
    /// Unknown ids are ignored; a click can race a catalog reload, so this is
    /// an interaction guard rather than an error path. Returns whether any
    /// flag actually changed.
    pub fn set_selected(&mut self, id: &str, selected: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if entry.selected != selected => {
                entry.selected = selected;
                true
            }
            Some(_) => false,
            None => {
                debug!(id, "ignoring selection toggle for unknown id");
                false
            }
        }
    }

    /// Select every entry in one update. Returns whether anything changed.
    pub fn select_all(&mut self) -> bool {
        let mut changed = false;
        for entry in &mut self.entries {
            changed |= !entry.selected;
            entry.selected = true;
        }
        changed
    }

    /// Deselect every entry in one update. Returns whether anything changed.
    pub fn deselect_all(&mut self) -> bool {
        let mut changed = false;
        for entry in &mut self.entries {
            changed |= entry.selected;
            entry.selected = false;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> Vec<ManifestEntry> {
        names
            .iter()
            .map(|n| ManifestEntry {
                name: (*n).to_string(),
                url: format!("images/{n}"),
            })
            .collect()
    }

    #[test]
    fn load_sorts_by_name() {
        let catalog = Catalog::load(listing(&["b.jpg", "a.jpg"]));
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn load_sorts_case_insensitively() {
        let catalog = Catalog::load(listing(&["B.jpg", "a.jpg", "C.jpg"]));
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a.jpg", "B.jpg", "C.jpg"]);
    }

    #[test]
    fn load_selects_everything_and_dedupes() {
        let catalog = Catalog::load(listing(&["a.jpg", "a.jpg", "b.jpg"]));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.selected_count(), 2);
    }

    #[test]
    fn unknown_id_is_a_silent_no_op() {
        let mut catalog = Catalog::load(listing(&["a.jpg"]));
        assert!(!catalog.set_selected("missing.jpg", false));
        assert_eq!(catalog.selected_count(), 1);
    }

    #[test]
    fn reselect_after_deselect_all() {
        let mut catalog = Catalog::load(listing(&["a.jpg", "b.jpg", "c.jpg"]));
        assert!(catalog.deselect_all());
        assert_eq!(catalog.selected_count(), 0);

        assert!(catalog.set_selected("a.jpg", true));
        let selection = catalog.selection();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].id, "a.jpg");
    }

    #[test]
    fn bulk_toggles_report_whether_anything_changed() {
        let mut catalog = Catalog::load(listing(&["a.jpg", "b.jpg"]));
        assert!(!catalog.select_all(), "already fully selected");
        assert!(catalog.deselect_all());
        assert!(!catalog.deselect_all(), "second pass changes nothing");
        assert!(catalog.select_all());
    }

    #[test]
    fn selection_preserves_catalog_order() {
        let mut catalog = Catalog::load(listing(&["c.jpg", "a.jpg", "b.jpg"]));
        catalog.set_selected("b.jpg", false);
        let ids: Vec<&str> = catalog.selection().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a.jpg", "c.jpg"]);
    }
}
