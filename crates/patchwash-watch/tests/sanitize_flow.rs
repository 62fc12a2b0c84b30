use std::path::Path;
use std::time::Duration;

use notify::event::CreateKind;
use notify::{Event, EventKind};
use patchwash_core::Redactor;
use patchwash_watch::{PatchProcessor, WatchDispatcher, WatchOptions};

async fn wait_for_content(path: &Path, expected: &str) {
    for _ in 0..250 {
        if let Ok(content) = tokio::fs::read_to_string(path).await {
            if content == expected {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("file at {} never reached the expected content", path.display());
}

#[tokio::test]
async fn test_full_patch_is_sanitized_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("0001-rework-billing-auth.patch");

    let input = "\
From 49f81c9b7aafa02a25d1a85234212f949a24e0ba Mon Sep 17 00:00:00 2001
From: Jane Doe <jane.doe@corp.example.com>
Date: Tue, 5 Mar 2024 12:00:00 +0100
Subject: [PATCH] Rework billing auth

Internal context nobody outside should read.
---
 service/auth.go | 4 ++--
 1 file changed, 2 insertions(+), 2 deletions(-)

diff --git a/service/auth.go b/service/auth.go
index 3c4d5e6..7f8a9b0 100644
--- a/service/auth.go
+++ b/service/auth.go
@@ -1,4 +1,4 @@
-import \"companysecrets\"
+dsn := os.Getenv(\"DATABASE_URL\")
";
    tokio::fs::write(&path, input).await.unwrap();

    let processor = PatchProcessor::new(Redactor::new(), 5, Duration::from_millis(10));
    let report = processor.process(&path).await.unwrap();

    let expected = "\
From REMOVED_HASH Mon Sep 17 00:00:00 2001
From: REMOVED_COMMITTER
Date: Tue, 5 Mar 2024 12:00:00 +0100
REMOVED_COMMIT_MESSAGE
REMOVED_COMMIT_MESSAGE
REMOVED_COMMIT_MESSAGE
---
 .go | 4 ++--
 1 file changed, 2 insertions(+), 2 deletions(-)

diff --git .go .go
index 3c4d5e6..7f8a9b0 100644
--- .go
+++ .go
@@ -1,4 +1,4 @@
-REMOVED_IMPORT
+dsn := REMOVED_ENV
";

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(content, expected);
    assert_eq!(content.lines().count(), input.lines().count());

    // The report covers both passes and the suppressed block
    let count_for = |rule: &str| {
        report
            .iter()
            .find(|c| c.rule == rule)
            .map(|c| c.count)
            .unwrap_or(0)
    };
    assert_eq!(count_for("commit_message"), 3);
    assert_eq!(count_for("from_header"), 1);
    assert_eq!(count_for("commit_hash"), 1);
    assert_eq!(count_for("import"), 1);
    assert_eq!(count_for("env_lookup"), 1);
}

#[tokio::test]
async fn test_dispatched_event_sanitizes_and_burst_is_debounced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("incoming.patch");
    tokio::fs::write(&path, "From: Jane <jane@example.com>\n")
        .await
        .unwrap();

    let options = WatchOptions {
        debounce: Duration::from_secs(60),
        settle: Duration::from_millis(10),
        retry_delay: Duration::from_millis(10),
        ..Default::default()
    };
    let dispatcher = WatchDispatcher::new(dir.path().to_path_buf(), options).unwrap();
    let event = Event::new(EventKind::Create(CreateKind::File)).add_path(path.clone());

    // First notification is admitted and the file gets rewritten
    dispatcher.handle_event(&event);
    wait_for_content(&path, "From: REMOVED_COMMITTER\n").await;

    // A repeat inside the debounce window is rejected, so content written
    // afterwards stays as it is
    tokio::fs::write(&path, "see bob@corp.io\n").await.unwrap();
    dispatcher.handle_event(&event);
    tokio::time::sleep(Duration::from_millis(200)).await;

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(content, "see bob@corp.io\n");
}

#[tokio::test]
async fn test_unmatched_file_is_never_touched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    tokio::fs::write(&path, "From: Jane <jane@example.com>\n")
        .await
        .unwrap();

    let options = WatchOptions {
        settle: Duration::from_millis(10),
        ..Default::default()
    };
    let dispatcher = WatchDispatcher::new(dir.path().to_path_buf(), options).unwrap();
    let event = Event::new(EventKind::Create(CreateKind::File)).add_path(path.clone());

    dispatcher.handle_event(&event);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(content, "From: Jane <jane@example.com>\n");
}
