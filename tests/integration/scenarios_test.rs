use saunabot::application::services::poller::PollerService;
use saunabot::application::services::reader::{FeedReader, ReadError};
use saunabot::domain::entities::message::IncomingMessage;
use saunabot::domain::entities::reading::Trend;
use saunabot::domain::parser::ParseError;
use saunabot::domain::ports::feed_source::FetchError;
use saunabot::domain::rules::{AlertGate, AlertState, TrendEvaluator};
use saunabot::domain::value_objects::{AlertThresholds, FeedFormat, GateDecision, ParseMode};
use saunabot::presentation::bot::{CommandDispatcher, Handled};

use crate::common::{at, load_fixture, Outgoing, RecordingMessenger, SwappableSource};

const GROUP: &str = "-1001234";

fn hot_message() -> Outgoing {
    Outgoing::Message {
        destination: GROUP.to_string(),
        text: "Saunassa ompi yli 70C".to_string(),
        mode: ParseMode::Html,
    }
}

// ---------------------------------------------------------------------------
// Heating then cooling: notify once, reset once
// ---------------------------------------------------------------------------

#[tokio::test]
async fn heating_notifies_then_cooling_resets() {
    let source = SwappableSource::new(Ok(load_fixture("feed_heating.csv")));
    let reader = FeedReader::new(&source, FeedFormat::Csv, TrendEvaluator::default());
    let state = AlertState::new();
    let messenger = RecordingMessenger::default();
    let poller = PollerService::new(
        &reader,
        AlertGate::new(AlertThresholds::default()),
        &state,
        &messenger,
        GROUP,
    );

    let outcome = poller
        .run_once(at(2024, 3, 2, 18, 2))
        .await
        .expect("heating poll");
    assert!((outcome.reading.latest_value - 74.0).abs() < f64::EPSILON);
    assert!((outcome.reading.delta - 13.0).abs() < f64::EPSILON);
    assert_eq!(outcome.reading.trend, Trend::Rising);
    assert_eq!(outcome.decision, GateDecision::Notify);
    assert!(outcome.delivered);
    assert!(state.is_notified());

    // Still hot a minute later: no repeat
    let outcome = poller
        .run_once(at(2024, 3, 2, 18, 3))
        .await
        .expect("second poll");
    assert_eq!(outcome.decision, GateDecision::Suppress);

    source.set(Ok(load_fixture("feed_cooling.csv")));
    let outcome = poller
        .run_once(at(2024, 3, 2, 22, 1))
        .await
        .expect("cooling poll");
    assert!((outcome.reading.latest_value - 64.0).abs() < f64::EPSILON);
    assert_eq!(outcome.reading.trend, Trend::Falling);
    assert_eq!(outcome.decision, GateDecision::Reset);
    assert!(!state.is_notified());

    assert_eq!(messenger.outgoing(), vec![hot_message()]);
}

// ---------------------------------------------------------------------------
// Stale data never notifies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_hot_feed_is_suppressed() {
    let source = SwappableSource::new(Ok(load_fixture("feed_stale.csv")));
    let reader = FeedReader::new(&source, FeedFormat::Csv, TrendEvaluator::default());
    let state = AlertState::new();
    let messenger = RecordingMessenger::default();
    let poller = PollerService::new(
        &reader,
        AlertGate::new(AlertThresholds::default()),
        &state,
        &messenger,
        GROUP,
    );

    let outcome = poller
        .run_once(at(2024, 3, 2, 18, 0))
        .await
        .expect("stale poll");
    assert!(outcome.reading.is_stale);
    assert_eq!(outcome.reading.age_minutes, 120);
    assert_eq!(outcome.decision, GateDecision::Suppress);
    assert!(!state.is_notified());
    assert!(messenger.outgoing().is_empty());
}

// ---------------------------------------------------------------------------
// Empty and unreachable feeds leave the state alone
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_feed_changes_nothing() {
    let source = SwappableSource::new(Ok(load_fixture("feed_heating.csv")));
    let reader = FeedReader::new(&source, FeedFormat::Csv, TrendEvaluator::default());
    let state = AlertState::new();
    let messenger = RecordingMessenger::default();
    let poller = PollerService::new(
        &reader,
        AlertGate::new(AlertThresholds::default()),
        &state,
        &messenger,
        GROUP,
    );
    poller
        .run_once(at(2024, 3, 2, 18, 2))
        .await
        .expect("heating poll");
    assert!(state.is_notified());

    source.set(Ok(String::new()));
    let err = poller
        .run_once(at(2024, 3, 2, 18, 3))
        .await
        .expect_err("empty feed");
    assert_eq!(err, ReadError::Parse(ParseError::EmptyFeed { dropped: 0 }));
    assert!(state.is_notified());

    source.set(Err(FetchError::HttpStatus(502)));
    let err = poller
        .run_once(at(2024, 3, 2, 18, 4))
        .await
        .expect_err("fetch failure");
    assert_eq!(err, ReadError::Fetch(FetchError::HttpStatus(502)));
    assert!(state.is_notified());

    assert_eq!(messenger.outgoing(), vec![hot_message()]);
}

// ---------------------------------------------------------------------------
// /sauna shares the reader but never touches the alert state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sauna_command_reports_without_alerting() {
    let source = SwappableSource::new(Ok(load_fixture("feed_stale.csv")));
    let reader = FeedReader::new(&source, FeedFormat::Csv, TrendEvaluator::default());
    let messenger = RecordingMessenger::default();
    let dispatcher = CommandDispatcher::new(&reader, &messenger);
    let command = IncomingMessage {
        chat_id: -1001234,
        message_id: 55,
        text: Some("/sauna@saunabot".to_string()),
        sender_chat_kind: None,
    };

    let handled = dispatcher
        .handle(&command, at(2024, 3, 2, 18, 0))
        .await
        .expect("handled");
    assert_eq!(handled, Handled::Replied);
    assert_eq!(
        messenger.outgoing(),
        vec![Outgoing::Reply {
            message_id: 55,
            text: "Saunan lämpötila on 80.0°C nouseva\n\
                   (Huom: viimeisin mittaus 120 min takaa, data ei päivity)"
                .to_string(),
        }]
    );
}
