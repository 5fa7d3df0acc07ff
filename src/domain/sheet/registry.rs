//! Process-wide table of configured sheet metadata.

use std::collections::HashMap;
use std::sync::RwLock;

use log::debug;

use super::descriptor::{SheetDescriptor, SheetId, SheetLocator};

#[derive(Debug, Default)]
struct RegistryInner {
    documents: HashMap<String, String>,
    sheets: HashMap<SheetId, SheetDescriptor>,
}

/// Maps sheet ids to their descriptors and document keys to remote document
/// ids. Replaced wholesale by [`SheetRegistry::replace`]; immutable between
/// reconfigurations.
#[derive(Debug, Default)]
pub struct SheetRegistry {
    inner: RwLock<RegistryInner>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new documents map and descriptor set, dropping all previous
    /// metadata.
    pub fn replace(&self, documents: HashMap<String, String>, descriptors: Vec<SheetDescriptor>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.documents = documents;
        inner.sheets = descriptors
            .into_iter()
            .map(|d| (d.id().clone(), d))
            .collect();
        debug!("sheet registry replaced, {} sheets configured", inner.sheets.len());
    }

    pub fn contains(&self, id: &str) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.sheets.contains_key(id)
    }

    pub fn sheet_ids(&self) -> Vec<SheetId> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.sheets.keys().cloned().collect()
    }

    /// Resolve the remote location for a sheet. `None` when either the sheet
    /// or its owning document is not configured.
    pub fn locator(&self, id: &str) -> Option<SheetLocator> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let sheet = inner.sheets.get(id)?;
        let document_id = inner.documents.get(sheet.document())?;
        Some(SheetLocator {
            document_id: document_id.clone(),
            sheet_name: sheet.name().clone(),
        })
    }

    /// Column position of `field` within the sheet's configured field list.
    pub fn field_index(&self, id: &str, field: &str) -> Option<usize> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.sheets.get(id)?.fields().iter().position(|f| f == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> SheetRegistry {
        let registry = SheetRegistry::new();
        let mut documents = HashMap::new();
        documents.insert("events-doc".to_string(), "1AbC".to_string());
        registry.replace(
            documents,
            vec![SheetDescriptor::new(
                "events",
                "Events 2024",
                "events-doc",
                vec!["title".to_string(), "date".to_string()],
            )],
        );
        registry
    }

    #[test]
    fn resolves_locators_for_configured_sheets() {
        let registry = sample_registry();
        let locator = registry.locator("events").unwrap();
        assert_eq!(locator.document_id, "1AbC");
        assert_eq!(locator.sheet_name, "Events 2024");
    }

    #[test]
    fn unknown_sheet_or_document_yields_none() {
        let registry = sample_registry();
        assert!(registry.locator("missing").is_none());

        // Sheet referencing a document key that was never configured.
        registry.replace(
            HashMap::new(),
            vec![SheetDescriptor::new("orphan", "Orphan", "nowhere", vec![])],
        );
        assert!(registry.locator("orphan").is_none());
    }

    #[test]
    fn field_index_follows_configured_order() {
        let registry = sample_registry();
        assert_eq!(registry.field_index("events", "title"), Some(0));
        assert_eq!(registry.field_index("events", "date"), Some(1));
        assert_eq!(registry.field_index("events", "venue"), None);
    }

    #[test]
    fn replace_drops_previous_metadata() {
        let registry = sample_registry();
        registry.replace(HashMap::new(), Vec::new());
        assert!(!registry.contains("events"));
        assert!(registry.sheet_ids().is_empty());
    }
}
