#![cfg(test)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mockall::mock;
use relay_bot::{
    activity::poller::ActivityPoller,
    base::{
        config::{Config, ConfigInner},
        types::{ActivityMessage, BoardAction, Res, Void},
    },
    runtime::Runtime,
    service::{
        board::{BoardClient, GenericBoardClient},
        chat::{ChatClient, GenericChatClient},
    },
};

// Mocks.

// Mock board client for testing.

mock! {
    pub Board {}

    #[async_trait]
    impl GenericBoardClient for Board {
        async fn fetch_actions(&self, filter: &str, limit: u32, since: DateTime<Utc>) -> Res<Vec<BoardAction>>;
        async fn get_last_activity(&self) -> Res<DateTime<Utc>>;
    }
}

// Mock chat client for testing.

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        async fn wait_until_ready(&self) -> Void;
        fn is_shutting_down(&self) -> bool;
        async fn send_activity(&self, message: &ActivityMessage) -> Void;
    }
}

// Helpers.

fn date(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Builds a realistic card action the way the board API would deliver it.
fn card_action(kind: &str, at: DateTime<Utc>, card_name: &str) -> BoardAction {
    serde_json::from_value(serde_json::json!({
        "type": kind,
        "date": at.to_rfc3339(),
        "memberCreator": { "fullName": "Test User", "initials": "TU" },
        "data": { "card": { "name": card_name, "desc": "details" } },
    }))
    .expect("valid action")
}

fn test_config() -> Config {
    Config {
        inner: Arc::new(ConfigInner {
            poll_interval_secs: 1,
            post_delay_secs: 0,
            ..Default::default()
        }),
    }
}

/// Board mock whose last activity is `seed` and whose every fetch returns
/// the same batch.
fn board_returning(seed: DateTime<Utc>, batch: Vec<BoardAction>) -> MockBoard {
    let mut board = MockBoard::new();

    board.expect_get_last_activity().returning(move || Ok(seed));
    board.expect_fetch_actions().returning(move |_, _, _| Ok(batch.clone()));

    board
}

/// Chat mock that records every sent message.
fn recording_chat() -> (MockChat, Arc<Mutex<Vec<ActivityMessage>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let mut chat = MockChat::new();

    let recorder = sent.clone();
    chat.expect_send_activity().returning(move |message| {
        recorder.lock().unwrap().push(message.clone());
        Ok(())
    });

    (chat, sent)
}

/// Adds scheduler-loop expectations: ready immediately, shut down after
/// `cycles` poll cycles.
fn with_scheduler_signals(chat: &mut MockChat, cycles: usize) {
    chat.expect_wait_until_ready().returning(|| Ok(()));

    let seen = AtomicUsize::new(0);
    chat.expect_is_shutting_down().returning(move || seen.fetch_add(1, Ordering::SeqCst) >= cycles);
}

async fn poller_with(board: MockBoard, chat: MockChat) -> ActivityPoller {
    ActivityPoller::new(&test_config(), BoardClient::new(Arc::new(board)), ChatClient::new(Arc::new(chat)))
        .await
        .expect("poller should seed")
}

// Poller tests.

#[tokio::test]
async fn test_poller_seeds_watermark_from_board() {
    let board = board_returning(date(100), vec![]);
    let (chat, _) = recording_chat();

    let poller = poller_with(board, chat).await;

    assert_eq!(poller.last_activity(), date(100));
}

#[tokio::test]
async fn test_quiet_board_sends_nothing_and_keeps_watermark() {
    let board = board_returning(date(100), vec![]);
    let (chat, sent) = recording_chat();

    let mut poller = poller_with(board, chat).await;

    // Two consecutive cycles with no new actions.
    poller.poll_once().await.expect("poll should succeed");
    poller.poll_once().await.expect("poll should succeed");

    assert!(sent.lock().unwrap().is_empty());
    assert_eq!(poller.last_activity(), date(100));
}

#[tokio::test]
async fn test_tied_timestamp_batch_is_dropped_wholesale() {
    // The head of the batch carries exactly the watermark date, so the
    // whole batch is discarded, same-dated unseen entries included.
    let batch = vec![card_action("createCard", date(100), "Newer"), card_action("commentCard", date(100), "Older")];
    let board = board_returning(date(100), batch);
    let (chat, sent) = recording_chat();

    let mut poller = poller_with(board, chat).await;

    poller.poll_once().await.expect("poll should succeed");

    assert!(sent.lock().unwrap().is_empty());
    assert_eq!(poller.last_activity(), date(100));
}

#[tokio::test]
async fn test_new_activity_is_relayed_oldest_first() {
    // Newest-first from the API; `createList` is fetched but unlabelled.
    let batch = vec![
        card_action("commentCard", date(300), "Third"),
        card_action("createList", date(250), "Second"),
        card_action("createCard", date(200), "First"),
    ];
    let board = board_returning(date(100), batch);
    let (chat, sent) = recording_chat();

    let mut poller = poller_with(board, chat).await;

    poller.poll_once().await.expect("poll should succeed");

    let sent = sent.lock().unwrap();
    let titles: Vec<&str> = sent.iter().map(|m| m.title.as_str()).collect();

    assert_eq!(titles, vec!["Card Created", "Comment left on Card"]);
    assert_eq!(sent[0].author, "Test User (TU)");
    assert_eq!(sent[0].lines, vec!["Card First w/ description details"]);
    assert_eq!(poller.last_activity(), date(300));
}

#[tokio::test]
async fn test_suppressed_actions_still_advance_the_watermark() {
    let batch = vec![card_action("createList", date(400), "Unrendered")];
    let board = board_returning(date(100), batch);
    let (chat, sent) = recording_chat();

    let mut poller = poller_with(board, chat).await;

    poller.poll_once().await.expect("poll should succeed");

    assert!(sent.lock().unwrap().is_empty());
    assert_eq!(poller.last_activity(), date(400));
}

#[tokio::test]
async fn test_repeated_batch_is_not_reposted() {
    let batch = vec![card_action("createCard", date(200), "Once")];
    let board = board_returning(date(100), batch);
    let (chat, sent) = recording_chat();

    let mut poller = poller_with(board, chat).await;

    // The second cycle sees the same batch head and treats it as seen.
    poller.poll_once().await.expect("poll should succeed");
    poller.poll_once().await.expect("poll should succeed");

    assert_eq!(sent.lock().unwrap().len(), 1);
    assert_eq!(poller.last_activity(), date(200));
}

// Runtime tests.

#[tokio::test]
async fn test_shutdown_stops_the_loop_before_polling() {
    let mut board = MockBoard::new();
    board.expect_get_last_activity().returning(|| Ok(date(100)));

    let (mut chat, sent) = recording_chat();
    with_scheduler_signals(&mut chat, 0);

    let runtime = Runtime {
        config: test_config(),
        board: BoardClient::new(Arc::new(board)),
        chat: ChatClient::new(Arc::new(chat)),
    };

    runtime.start().await.expect("start should exit cleanly");

    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_full_pipeline_relays_one_batch_then_shuts_down() {
    let batch = vec![
        card_action("commentCard", date(300), "Second"),
        card_action("createCard", date(200), "First"),
    ];
    let board = board_returning(date(100), batch);

    let (mut chat, sent) = recording_chat();
    with_scheduler_signals(&mut chat, 1);

    let runtime = Runtime {
        config: test_config(),
        board: BoardClient::new(Arc::new(board)),
        chat: ChatClient::new(Arc::new(chat)),
    };

    runtime.start().await.expect("start should exit cleanly");

    let titles: Vec<String> = sent.lock().unwrap().iter().map(|m| m.title.clone()).collect();
    assert_eq!(titles, vec!["Card Created", "Comment left on Card"]);
}

#[tokio::test]
async fn test_send_failure_does_not_stop_the_loop() {
    let mut board = MockBoard::new();
    board.expect_get_last_activity().returning(|| Ok(date(100)));

    // A fresh single-action batch each cycle, so both cycles attempt a send.
    let calls = AtomicUsize::new(0);
    board.expect_fetch_actions().returning(move |_, _, _| {
        let n = calls.fetch_add(1, Ordering::SeqCst) as i64;
        Ok(vec![card_action("createCard", date(310 + n * 10), "Doomed")])
    });

    let mut chat = MockChat::new();
    with_scheduler_signals(&mut chat, 2);
    chat.expect_send_activity().times(2).returning(|_| Err(anyhow::anyhow!("channel unavailable")));

    let runtime = Runtime {
        config: test_config(),
        board: BoardClient::new(Arc::new(board)),
        chat: ChatClient::new(Arc::new(chat)),
    };

    // Both cycles fail to deliver, but the loop still runs to shutdown.
    runtime.start().await.expect("start should exit cleanly");
}

#[tokio::test]
async fn test_seed_failure_aborts_start() {
    let mut board = MockBoard::new();
    board.expect_get_last_activity().returning(|| Err(anyhow::anyhow!("board unreachable")));

    let chat = MockChat::new();

    let runtime = Runtime {
        config: test_config(),
        board: BoardClient::new(Arc::new(board)),
        chat: ChatClient::new(Arc::new(chat)),
    };

    assert!(runtime.start().await.is_err());
}
