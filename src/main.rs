// src/main.rs
//
// Interactive agent front end: parse a question, resolve the collection name,
// then answer with its floor price or stats.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use collection_resolver::{
    load_settings, parse_query, CollectionResolver, MagicEdenClient, MemoryCache, QueryIntent,
    SlidingWindowLimiter,
};

/// Pages fetched by `--warm-up`.
const WARM_UP_PAGES: usize = 100;

#[derive(Parser)]
#[command(name = "collection-resolver")]
#[command(about = "Resolve loosely typed NFT collection names and look up their market data")]
struct Args {
    /// Pre-load the full collection catalog before answering
    #[arg(long)]
    warm_up: bool,

    /// Question to answer; reads questions from stdin when omitted
    query: Vec<String>,
}

struct Agent {
    client: Arc<MagicEdenClient>,
    resolver: CollectionResolver<MagicEdenClient>,
}

impl Agent {
    fn speak(&self, message: &str) {
        println!("[AI AGENT]: {message}");
    }

    async fn handle(&self, text: &str) {
        let parsed = parse_query(text);
        let (Some(intent), Some(raw_name)) = (parsed.intent, parsed.collection_name) else {
            self.speak(
                "I'm not sure what you'd like to do. You can ask for 'floor price of [collection]' or 'stats for [collection]'.",
            );
            return;
        };

        self.speak(&format!("Looking for a collection related to \"{raw_name}\"..."));
        let Some(collection) = self.resolver.resolve_collection(&raw_name, None, None).await else {
            self.speak(&format!(
                "Sorry, I couldn't find a collection matching \"{raw_name}\". Could you try a different name or check the spelling?"
            ));
            return;
        };
        self.speak(&format!("Found: {} (Symbol: {}).", collection.name, collection.symbol));

        match intent {
            QueryIntent::FloorPrice => match self.client.floor_price(&collection.symbol).await {
                Ok(floor) => {
                    let price = floor
                        .floor_price
                        .map(|p| format!("{p} {}", floor.currency))
                        .unwrap_or_else(|| "not available".to_string());
                    self.speak(&format!(
                        "The floor price for {} ({}) is {} with {} listed.",
                        collection.name, collection.symbol, price, floor.listed
                    ));
                }
                Err(e) => {
                    warn!("Floor price lookup failed for {}: {}", collection.symbol, e);
                    self.speak("The marketplace did not answer. Please try again shortly.");
                }
            },
            QueryIntent::CollectionStats => {
                match self.client.collection_stats(&collection.symbol).await {
                    Ok(stats) => {
                        let body = serde_json::to_string(&stats).unwrap_or_default();
                        self.speak(&format!(
                            "Here are some stats for {} ({}): {}",
                            collection.name, collection.symbol, body
                        ));
                    }
                    Err(e) => {
                        warn!("Stats lookup failed for {}: {}", collection.symbol, e);
                        self.speak("The marketplace did not answer. Please try again shortly.");
                    }
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = load_settings().context("invalid resolver configuration")?;
    let limiter = Arc::new(SlidingWindowLimiter::new(
        settings.rate_limit.max_requests,
        settings.rate_limit.window(),
    ));
    let client = Arc::new(
        MagicEdenClient::new(&settings, limiter).context("failed to build HTTP client")?,
    );
    let resolver = CollectionResolver::new(client.clone(), Arc::new(MemoryCache::new()), &settings);
    let agent = Agent { client, resolver };

    if args.warm_up {
        info!("Warming up collection catalog ({} pages max)", WARM_UP_PAGES);
        let count = agent.resolver.warm_up(WARM_UP_PAGES).await;
        info!("Catalog ready with {} collections", count);
    }

    if !args.query.is_empty() {
        let text = args.query.join(" ");
        println!("[USER]: {text}");
        agent.handle(&text).await;
        return Ok(());
    }

    println!("Ask for 'floor price of [collection]' or 'stats for [collection]'. Type 'exit' to quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("[YOU]: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        if text.eq_ignore_ascii_case("exit") {
            break;
        }
        if !text.is_empty() {
            agent.handle(text).await;
        }
    }
    agent.speak("Goodbye!");
    Ok(())
}
