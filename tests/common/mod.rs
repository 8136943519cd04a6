use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use collection_resolver::{Collection, CollectionSource, ResolverResult};

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Paged in-memory catalog that counts requests.
pub struct PagedCatalog {
    collections: Vec<Collection>,
    calls: AtomicUsize,
}

impl PagedCatalog {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            collections,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CollectionSource for PagedCatalog {
    async fn fetch_page(&self, offset: usize, limit: usize) -> ResolverResult<Vec<Collection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let start = offset.min(self.collections.len());
        let end = (offset + limit).min(self.collections.len());
        Ok(self.collections[start..end].to_vec())
    }
}

/// Realistic names buried among `filler` generic entries.
pub fn marketplace_catalog(filler: usize) -> Vec<Collection> {
    let mut collections: Vec<Collection> = (0..filler)
        .map(|i| Collection::new(format!("gen_{i}"), format!("Generated Set {i}")))
        .collect();
    collections.extend([
        Collection::new("mad_lads", "Mad Lads"),
        Collection::new("oddkey_cover_poaps_nft", "OddKey Cover POAPs NFT"),
        Collection::new("solana_spaces", "Solana Spaces"),
        Collection::new("okay_bears", "Okay Bears"),
    ]);
    collections
}
