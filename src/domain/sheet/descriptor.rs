// Sheet metadata as supplied by the embedding application.
// A descriptor names the remote document a sheet lives in, the tab to query,
// and the ordered field list used for cell lookup.

use getset::Getters;
use serde::{Deserialize, Serialize};

/// Opaque key identifying one remote sheet.
pub type SheetId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct SheetDescriptor {
    id: SheetId,
    name: String,
    document: String,
    fields: Vec<String>,
}

impl SheetDescriptor {
    pub fn new(id: &str, name: &str, document: &str, fields: Vec<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            document: document.to_string(),
            fields,
        }
    }
}

/// Fully resolved location of a sheet within its remote document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocator {
    pub document_id: String,
    pub sheet_name: String,
}
