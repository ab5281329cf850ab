//! Config-driven routing tests: TOML routes, JSON batch files, built-in handlers.

use std::path::PathBuf;

use queue_router::config::{load_config, parse_config, ConfigError};
use queue_router::message::MessageState;
use queue_router::{MessageBatch, Router};

const CONFIG: &str = r#"
[observability]
log_level = "debug"

[retry]
step_secs = 15
max_delay_secs = 600

[[routes]]
name = "drafts"
action = "PutObject"
pattern = "/content/drafts/:rest*"
handler = "retry"

[[routes]]
name = "private"
action = "PutObject"
pattern = "/content/private/:rest+"
handler = "reject"

[[routes]]
name = "index"
action = "PutObject"
pattern = "/content/:path+"

[[routes]]
name = "clear"
action = "DeleteObject"
pattern = "/content/:path+"
"#;

const BATCH: &str = r#"{
    "queue": "object-events",
    "messages": [
        {"id": "m-1", "attempts": 1, "body": {"action": "PutObject", "object": {"key": "content/2024/post.json"}}},
        {"id": "m-2", "attempts": 3, "body": {"action": "PutObject", "object": {"key": "content/drafts/next.json"}}},
        {"id": "m-3", "attempts": 1, "body": {"action": "PutObject", "object": {"key": "content/private/notes.json"}}},
        {"id": "m-4", "attempts": 1, "body": {"action": "DeleteObject", "object": {"key": "content/2023/old.json"}}},
        {"id": "m-5", "attempts": 1, "body": {"action": "CopyObject", "object": {"key": "content/a.json"}}},
        {"id": "m-6", "attempts": 1, "body": "garbage"}
    ]
}"#;

fn temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("queue-router-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_config_routes_process_batch_file() {
    let path = temp_config("routes", CONFIG);
    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap_or_default();

    let router = Router::from_config(&config.routes, &config.retry).unwrap();
    assert_eq!(router.len(), 4);

    let batch = MessageBatch::from_json(BATCH).unwrap();
    let summary = router.process_batch(&batch, &(), &()).await;

    let states: Vec<_> = batch.messages().iter().map(|m| m.state()).collect();
    assert_eq!(
        states,
        vec![
            MessageState::Acked,
            // (3 + 1) * 15; the handler's retry settles before the router's ack
            MessageState::Retried {
                delay_seconds: Some(60)
            },
            MessageState::Pending,
            MessageState::Acked,
            MessageState::Pending,
            MessageState::Pending,
        ]
    );
    assert_eq!(summary.total, 6);
    assert_eq!(summary.dispatched, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.no_route, 1);
    assert_eq!(summary.malformed, 1);
}

#[test]
fn test_find_route_uses_declaration_order() {
    let config = parse_config(CONFIG).unwrap();
    let router = Router::from_config(&config.routes, &config.retry).unwrap();

    let (route, params) = router.find_route("PutObject", "content/drafts/a/b.json").unwrap();
    assert_eq!(route.matcher().as_str(), "/content/drafts/:rest*");
    assert_eq!(params.get("rest"), Some("a/b.json"));

    let (route, params) = router.find_route("PutObject", "content/drafts").unwrap();
    assert_eq!(route.matcher().as_str(), "/content/drafts/:rest*");
    assert_eq!(params.get("rest"), Some(""));

    // `:rest+` needs at least one segment, so the catch-all wins.
    let (route, params) = router.find_route("PutObject", "content/private").unwrap();
    assert_eq!(route.matcher().as_str(), "/content/:path+");
    assert_eq!(params.get("path"), Some("private"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = parse_config(
        r#"
        [[routes]]
        name = "broken"
        action = "PutObject"
        pattern = "/content/:+"
        "#,
    )
    .unwrap_err();

    match err {
        ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
        other => panic!("expected validation error, got {}", other),
    }
}
