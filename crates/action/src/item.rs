use serde::{Deserialize, Serialize};

/// JSON object carried by an [`Item`].
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// One record flowing along a connection between two nodes.
///
/// A node receives a record set (`Vec<Item>`) on its input and emits one
/// record set per output port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The record's fields.
    pub json: JsonObject,
    /// Which input item this record was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<PairedItem>,
}

/// Provenance link from an output item back to an input item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairedItem {
    /// Index of the originating item in the node's input record set.
    pub item: usize,
}

impl Item {
    /// Create an item without provenance.
    #[must_use]
    pub fn new(json: JsonObject) -> Self {
        Self {
            json,
            paired_item: None,
        }
    }

    /// Link this item to the input item at `index`.
    #[must_use]
    pub fn with_paired_item(mut self, index: usize) -> Self {
        self.paired_item = Some(PairedItem { item: index });
        self
    }

    /// Read a field.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.json.get(key)
    }
}

impl From<JsonObject> for Item {
    fn from(json: JsonObject) -> Self {
        Self::new(json)
    }
}
