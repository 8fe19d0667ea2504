//! Pokedex - A command-line Pokedex explorer
//!
//! Browses PokeAPI from a REPL, memoizing responses in a time-expiring cache.

use std::io::{self, Write};

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::pokedex::Pokedex;
use pokedex::repl::{clean_input, Command, Outcome, Session, PROMPT};
use pokedex::{Config, ExpiringCache, PokeApiClient};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Read commands from stdin until `exit` or end of input
/// 5. Stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs don't interleave with REPL output,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, api_base_url={}",
        config.cache_interval, config.api_base_url
    );

    let cache = ExpiringCache::new(config.cache_ttl()).context("failed to create cache")?;
    let client = PokeApiClient::new(config.api_base_url.clone(), cache.clone());
    let mut session = Session::new(client, Pokedex::new(), StdRng::from_entropy());

    run_repl(&mut session).await?;

    let stats = cache.stats().await;
    debug!(
        "Cache stats: hits={}, misses={}, reaped={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.reaped,
        stats.hit_rate()
    );
    cache.shutdown().await;
    Ok(())
}

/// Reads lines from stdin and executes them until the session exits.
async fn run_repl(session: &mut Session<StdRng>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    println!("---- POKEDEXCLI ----");
    loop {
        print!("{}", PROMPT);
        stdout.flush().context("failed to flush prompt")?;

        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            println!();
            return Ok(());
        };

        let Some(command) = Command::parse(&clean_input(&line)) else {
            continue;
        };

        match session.execute(command, &mut stdout).await {
            Ok(Outcome::Exit) => return Ok(()),
            Ok(Outcome::Continue) => {}
            Err(err) => println!("Error: {}", err),
        }
    }
}
