//! Integration Tests for the PokeAPI client and REPL session
//!
//! Runs against a minimal local HTTP server so no real network is needed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use pokedex::pokedex::Pokedex;
use pokedex::repl::{clean_input, Command, Outcome, Session};
use pokedex::{ExpiringCache, PokeApiClient, PokedexError};

// == Helper Functions ==

/// Canned responses by request path, plus a count of requests served.
struct StubServer {
    base_url: String,
    requests: Arc<AtomicUsize>,
}

impl StubServer {
    async fn start(routes: Vec<(&'static str, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<HashMap<&'static str, &'static str>> =
            Arc::new(routes.into_iter().collect());
        let requests = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let routes = Arc::clone(&routes);
                let counter = Arc::clone(&counter);

                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    counter.fetch_add(1, Ordering::SeqCst);

                    let request = String::from_utf8_lossy(&buf);
                    let path = request.split_whitespace().nth(1).unwrap_or("/");
                    let (status, body) = match routes.get(path) {
                        Some(body) => ("200 OK", *body),
                        None => ("404 Not Found", "Not Found"),
                    };
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{}/api/v2", addr),
            requests,
        }
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

const PIKACHU: &str = r#"{"name":"pikachu","base_experience":112,"height":4,"weight":60,
    "stats":[{"base_stat":35,"stat":{"name":"hp"}}],"types":[{"type":{"name":"electric"}}]}"#;

const FIRST_PAGE: &str = r#"{"count":1,"next":null,"previous":null,
    "results":[{"name":"canalave-city-area"},{"name":"eterna-city-area"}]}"#;

const CANALAVE: &str = r#"{"name":"canalave-city-area",
    "pokemon_encounters":[{"pokemon":{"name":"tentacool"}},{"pokemon":{"name":"pikachu"}}]}"#;

fn client(server: &StubServer, ttl: Duration) -> PokeApiClient {
    PokeApiClient::new(server.base_url.clone(), ExpiringCache::new(ttl).unwrap())
}

// == Client Tests ==

#[tokio::test]
async fn test_second_fetch_served_from_cache() {
    let server = StubServer::start(vec![("/api/v2/pokemon/pikachu", PIKACHU)]).await;
    let client = client(&server, Duration::from_secs(60));

    let first = client.fetch_pokemon("pikachu").await.unwrap();
    let second = client.fetch_pokemon("pikachu").await.unwrap();

    assert_eq!(first.name, second.name);
    assert_eq!(server.requests(), 1);

    let stats = client.cache().stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_cache_key_is_full_url() {
    let server = StubServer::start(vec![("/api/v2/pokemon/pikachu", PIKACHU)]).await;
    let client = client(&server, Duration::from_secs(60));

    client.fetch_pokemon("pikachu").await.unwrap();

    let cached = client.cache().get(&client.pokemon_url("pikachu")).await;
    assert_eq!(cached.as_deref(), Some(PIKACHU.as_bytes()));
}

#[tokio::test]
async fn test_error_status_not_cached() {
    let server = StubServer::start(vec![]).await;
    let client = client(&server, Duration::from_secs(60));

    let result = client.fetch_pokemon("missingno").await;
    assert!(matches!(
        result,
        Err(PokedexError::UnexpectedStatus { status: 404, .. })
    ));

    let _ = client.fetch_pokemon("missingno").await;
    assert_eq!(server.requests(), 2);
    assert!(client.cache().is_empty().await);
}

#[tokio::test]
async fn test_expired_response_refetched() {
    let server = StubServer::start(vec![("/api/v2/location-area/", FIRST_PAGE)]).await;
    let client = client(&server, Duration::from_millis(50));

    client.fetch_location_areas(None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    client.fetch_location_areas(None).await.unwrap();

    assert_eq!(server.requests(), 2);
    client.cache().shutdown().await;
}

// == Session Tests ==

async fn execute(session: &mut Session<StdRng>, line: &str) -> (Outcome, String) {
    let command = Command::parse(&clean_input(line)).unwrap();
    let mut out = Vec::new();
    let outcome = session.execute(command, &mut out).await.unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_session_walkthrough() {
    let server = StubServer::start(vec![
        ("/api/v2/location-area/", FIRST_PAGE),
        ("/api/v2/location-area/canalave-city-area", CANALAVE),
        ("/api/v2/pokemon/pikachu", PIKACHU),
    ])
    .await;
    let client = client(&server, Duration::from_secs(60));
    let mut session = Session::new(client, Pokedex::new(), StdRng::seed_from_u64(42));

    let (_, output) = execute(&mut session, "map").await;
    assert_eq!(output, "canalave-city-area\neterna-city-area\n");

    let (_, output) = execute(&mut session, "mapb").await;
    assert_eq!(output, "You're on the first page\n");

    let (_, output) = execute(&mut session, "  EXPLORE canalave-city-area ").await;
    assert!(output.contains(" - tentacool\n - pikachu\n"));

    // Keep throwing until it sticks; later attempts hit the cache
    let mut attempts = 0;
    while !session.pokedex().contains("pikachu") {
        attempts += 1;
        assert!(attempts < 200, "pikachu never caught");
        execute(&mut session, "catch pikachu").await;
    }
    assert_eq!(server.requests(), 3);

    let (_, output) = execute(&mut session, "catch pikachu").await;
    assert!(output.contains("pikachu is already in your Pokedex!"));

    let (_, output) = execute(&mut session, "inspect pikachu").await;
    assert!(output.contains("Types:\n  - electric\n"));

    let (_, output) = execute(&mut session, "pokedex").await;
    assert_eq!(output, "Your Pokedex:\n - pikachu\n");

    let (outcome, _) = execute(&mut session, "exit").await;
    assert_eq!(outcome, Outcome::Exit);
}

#[tokio::test]
async fn test_session_reports_fetch_errors() {
    let server = StubServer::start(vec![]).await;
    let client = client(&server, Duration::from_secs(60));
    let mut session = Session::new(client, Pokedex::new(), StdRng::seed_from_u64(1));

    let command = Command::parse(&clean_input("explore nowhere")).unwrap();
    let mut out = Vec::new();
    let result = session.execute(command, &mut out).await;

    assert!(matches!(
        result,
        Err(PokedexError::UnexpectedStatus { status: 404, .. })
    ));
}
