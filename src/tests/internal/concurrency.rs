//! 下载器并发测试：跨任务取消、状态订阅、终态互斥。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::timeout;

use crate::downloader::{DownloadOutcome, DownloadStatus, Downloader};
use crate::tests::{TestRoute, TestServer, random_payload, temp_dir};

fn slow_route(len: usize) -> TestRoute {
    TestRoute::Slow {
        body: random_payload(len),
        piece: 1024,
        delay: Duration::from_millis(20),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancel_from_another_task() {
    let server = TestServer::start([("/slow", slow_route(64 * 1024))]).await;
    let dir = temp_dir();
    let path = dir.path().join("slow.bin");

    let downloader = Downloader::new(server.url("/slow")).save_to(&path);
    let controller = downloader.controller();
    let mut watcher = downloader.progress().watch();

    let canceller = Arc::clone(&controller);
    tokio::spawn(async move {
        while let Ok(event) = watcher.changed().await {
            if event.bytes_read >= 2048 {
                let _ = canceller.cancel();
                break;
            }
        }
    });

    let outcome = timeout(Duration::from_secs(10), downloader.send())
        .await
        .expect("取消后下载应尽快结束");

    assert!(matches!(outcome, DownloadOutcome::Cancelled { .. }));
    assert!(!path.exists());
    assert!(controller.is_cancelled());
    assert!(!controller.is_done() && !controller.had_error());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn subscribers_observe_terminal_status() {
    let server = TestServer::start([("/slow", slow_route(4 * 1024))]).await;

    let downloader = Downloader::new(server.url("/slow"));
    let controller = downloader.controller();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    controller.subscribe_status(true, move |status| sink.lock().unwrap().push(status));

    let outcome = downloader.send().await;
    assert!(outcome.is_success());

    let result = timeout(Duration::from_secs(2), async {
        loop {
            if seen.lock().unwrap().last() == Some(&DownloadStatus::Completed) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(result.is_ok(), "订阅者应收到 Completed");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_cancel_leaves_exactly_one_terminal_state() {
    for _ in 0..20 {
        let server = TestServer::start([("/r", TestRoute::Fixed(random_payload(8 * 1024)))]).await;
        let downloader = Downloader::new(server.url("/r")).buffer_size(512);
        let controller = downloader.controller();

        let canceller = Arc::clone(&controller);
        let cancel_task = tokio::spawn(async move {
            tokio::task::yield_now().await;
            canceller.cancel()
        });
        let outcome = downloader.send().await;
        let cancel_result = cancel_task.await.unwrap();

        let flags = [controller.is_done(), controller.is_cancelled(), controller.had_error()];
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        assert_eq!(outcome.status(), controller.status());
        match outcome {
            DownloadOutcome::Cancelled { .. } => assert!(cancel_result.is_ok()),
            DownloadOutcome::Completed(_) => assert!(cancel_result.is_err()),
            DownloadOutcome::Failed { error, .. } => panic!("不应失败: {error}"),
        }
    }
}
