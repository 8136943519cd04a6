use serde::{Deserialize, Deserializer, Serialize};

use crate::services::matcher::normalizer::{normalize_key, tokenize};

/// A single marketplace collection as returned by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Collection {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            image: None,
            description: None,
        }
    }
}

// Some listings carry `"name": null`
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Comparison keys derived once per collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionKeys {
    pub name_key: String,
    pub symbol_key: String,
    pub name_tokens: Vec<String>,
}

impl CollectionKeys {
    fn from_collection(collection: &Collection) -> Self {
        Self {
            name_key: normalize_key(&collection.name),
            symbol_key: normalize_key(&collection.symbol),
            name_tokens: tokenize(&collection.name),
        }
    }
}

/// The full collection directory, in fetch order.
///
/// Duplicate symbols across pages are kept as-is.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    collections: Vec<Collection>,
    /// Pre-computed: keys[i] belongs to collections[i].
    keys: Vec<CollectionKeys>,
}

impl Catalog {
    /// Build a Catalog from raw collections, pre-computing comparison keys.
    pub fn new(collections: Vec<Collection>) -> Self {
        let keys = collections
            .iter()
            .map(CollectionKeys::from_collection)
            .collect();
        Self { collections, keys }
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn get(&self, index: usize) -> Option<&Collection> {
        self.collections.get(index)
    }

    /// Iterate `(index, collection, keys)` in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Collection, &CollectionKeys)> {
        self.collections
            .iter()
            .zip(self.keys.iter())
            .enumerate()
            .map(|(i, (collection, keys))| (i, collection, keys))
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
