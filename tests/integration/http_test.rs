//! Real HTTP adapters against throwaway loopback servers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use saunabot::application::services::poller::PollerService;
use saunabot::application::services::reader::FeedReader;
use saunabot::domain::ports::update_source::UpdateSource;
use saunabot::domain::rules::{AlertGate, AlertState, TrendEvaluator};
use saunabot::domain::value_objects::{AlertThresholds, FeedFormat, GateDecision};
use saunabot::infrastructure::feed::HttpFeedFetcher;
use saunabot::infrastructure::messaging::TelegramClient;
use saunabot::presentation::bot::{CommandDispatcher, UpdateListener};

use crate::common::{at, load_fixture};

const TOKEN: &str = "42:INTEGRATION";

// ---------------------------------------------------------------------------
// Loopback server answering every request with a fixed response
// ---------------------------------------------------------------------------

struct Server {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Server {
    async fn start(status: &'static str, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                log.lock().expect("lock").push(request);
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base, requests }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("lock").clone()
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            break;
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn telegram(base: &str) -> TelegramClient {
    TelegramClient::new(base, TOKEN, Duration::from_secs(5), Duration::from_secs(1))
        .expect("telegram client")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hot_feed_is_announced_through_telegram() {
    let feed = Server::start("200 OK", load_fixture("feed_heating.csv")).await;
    let bot_api = Server::start(
        "200 OK",
        r#"{"ok":true,"result":{"message_id":1,"chat":{"id":-1001234,"type":"supergroup"}}}"#
            .to_string(),
    )
    .await;

    let fetcher = HttpFeedFetcher::new(
        format!("{}/channels/1/fields/1.csv", feed.base),
        Duration::from_secs(5),
    )
    .expect("feed client");
    let reader = FeedReader::new(&fetcher, FeedFormat::Csv, TrendEvaluator::default());
    let client = telegram(&bot_api.base);
    let state = AlertState::new();
    let poller = PollerService::new(
        &reader,
        AlertGate::new(AlertThresholds::default()),
        &state,
        &client,
        "-1001234",
    );

    let outcome = poller
        .run_once(at(2024, 3, 2, 18, 2))
        .await
        .expect("poll");
    assert_eq!(outcome.decision, GateDecision::Notify);
    assert!(outcome.delivered);

    let sent = bot_api.requests();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("POST /bot42:INTEGRATION/sendMessage HTTP/1.1"));
    assert!(sent[0].contains("Saunassa ompi yli 70C"));
    assert!(sent[0].contains(r#""parse_mode":"HTML""#));
    assert!(feed.requests()[0].starts_with("GET /channels/1/fields/1.csv HTTP/1.1"));
}

#[tokio::test]
async fn rejected_delivery_keeps_alert_latched() {
    let feed = Server::start("200 OK", load_fixture("feed_heating.csv")).await;
    let bot_api = Server::start(
        "403 Forbidden",
        r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was kicked from the group chat"}"#
            .to_string(),
    )
    .await;

    let fetcher =
        HttpFeedFetcher::new(feed.base.clone(), Duration::from_secs(5)).expect("feed client");
    let reader = FeedReader::new(&fetcher, FeedFormat::Csv, TrendEvaluator::default());
    let client = telegram(&bot_api.base);
    let state = AlertState::new();
    let poller = PollerService::new(
        &reader,
        AlertGate::new(AlertThresholds::default()),
        &state,
        &client,
        "-1001234",
    );

    let outcome = poller
        .run_once(at(2024, 3, 2, 18, 2))
        .await
        .expect("poll");
    assert_eq!(outcome.decision, GateDecision::Notify);
    assert!(!outcome.delivered);
    assert!(state.is_notified());
}

#[tokio::test]
async fn listener_answers_sauna_command_over_http() {
    let feed = Server::start("200 OK", "66.5\n".to_string()).await;
    // Same canned body serves getUpdates and the reply; the reply only needs `ok`.
    let bot_api = Server::start(
        "200 OK",
        r#"{"ok":true,"result":[{"update_id":700,"message":{"message_id":5,"chat":{"id":-1001234,"type":"supergroup"},"text":"/sauna"}}]}"#
            .to_string(),
    )
    .await;

    let fetcher =
        HttpFeedFetcher::new(feed.base.clone(), Duration::from_secs(5)).expect("feed client");
    let reader = FeedReader::new(&fetcher, FeedFormat::Bare, TrendEvaluator::default());
    let client = telegram(&bot_api.base);
    let dispatcher = CommandDispatcher::new(&reader, &client);
    let listener = UpdateListener::new(&client, &dispatcher);

    let next = listener.poll_once(None).await.expect("poll updates");
    assert_eq!(next, Some(701));

    let sent = bot_api.requests();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].contains("/getUpdates"));
    assert!(sent[1].contains("/sendMessage"));
    assert!(sent[1].contains(r#""reply_parameters":{"message_id":5}"#));
    assert!(sent[1].contains("Saunan lämpötila on 66.5°C tasainen"));

    // The update source port is usable on its own too
    let updates = client.poll_updates(Some(701)).await.expect("updates");
    assert_eq!(updates[0].update_id, 700);
}
