use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::services::catalog::{Collection, CollectionSource};
use crate::types::errors::{ResolverError, ResolverResult};

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// In-memory paged source serving slices of a fixed collection list.
pub struct ScriptedSource {
    collections: Vec<Collection>,
    fail_at_page: Option<usize>,
    latency: Option<Duration>,
    calls: AtomicUsize,
    offsets: Mutex<Vec<usize>>,
}

impl ScriptedSource {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            collections,
            fail_at_page: None,
            latency: None,
            calls: AtomicUsize::new(0),
            offsets: Mutex::new(Vec::new()),
        }
    }

    /// Make the request for `page` (zero-based) fail with an HTTP 500.
    pub fn failing_at(mut self, page: usize) -> Self {
        self.fail_at_page = Some(page);
        self
    }

    /// Sleep this long inside every request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn offsets(&self) -> Vec<usize> {
        self.offsets.lock().unwrap().clone()
    }
}

impl CollectionSource for ScriptedSource {
    async fn fetch_page(&self, offset: usize, limit: usize) -> ResolverResult<Vec<Collection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.offsets.lock().unwrap().push(offset);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.fail_at_page == Some(offset / limit.max(1)) {
            return Err(ResolverError::Status {
                status: 500,
                url: format!("scripted://collections?offset={offset}&limit={limit}"),
            });
        }

        let start = offset.min(self.collections.len());
        let end = (offset + limit).min(self.collections.len());
        Ok(self.collections[start..end].to_vec())
    }
}

/// `count` filler collections named "Filler Collection N" with symbol `filler_n`.
pub fn filler_collections(count: usize) -> Vec<Collection> {
    (0..count)
        .map(|i| Collection::new(format!("filler_{i}"), format!("Filler Collection {i}")))
        .collect()
}

/// A small catalog modelled on real marketplace names.
pub fn sample_collections() -> Vec<Collection> {
    vec![
        Collection::new("mad_lads", "Mad Lads"),
        Collection::new("y00ts", "y00ts"),
        Collection::new("bushido_warriors_drip_army", "Bushido Warriors Drip Army"),
        Collection::new("oddkey_cover_poaps_nft", "OddKey Cover POAPs NFT"),
        Collection::new("handstylez", "Handstylez"),
        Collection::new("solana_spaces", "Solana Spaces"),
        Collection::new("solhunter_azure", "SolHunter Azure"),
        Collection::new("solid_talk_34", "Solid Talk #34"),
        Collection::new("degods", "DeGods"),
        Collection::new("okay_bears", "Okay Bears"),
    ]
}

/// Loopback HTTP server answering every request with the next canned
/// `(status, body)` pair; the last pair repeats once the list runs out.
pub struct CannedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    pub async fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v2", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let head = read_request_head(&mut stream).await;
                let served = {
                    let mut seen = seen.lock().unwrap();
                    seen.push(head);
                    seen.len() - 1
                };

                let (status, body) = &responses[served.min(responses.len() - 1)];
                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    /// Base URL in the shape of the marketplace API root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request heads received so far (request line plus headers).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn read_request_head(stream: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}
