//! 响应式属性并发测试
//!
//! 测试项：
//! - 快速更新时监听者最终读到最后一个值
//! - 多个监听者同时等待时都会被唤醒

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::timeout;

use crate::states::ReactiveProperty;

#[tokio::test]
async fn watcher_sees_final_value_after_rapid_updates() {
    let prop = ReactiveProperty::new(0i32);
    let mut watcher = prop.watch();
    let p = prop.clone();

    tokio::spawn(async move {
        for i in 1..=100 {
            p.update(i);
            tokio::task::yield_now().await;
        }
    });

    let result = timeout(Duration::from_secs(5), async {
        loop {
            if watcher.changed().await.unwrap() == 100 {
                break;
            }
        }
    })
    .await;
    assert!(result.is_ok(), "监听者应该能读到最后一次更新");
    assert_eq!(prop.get_current(), 100);
}

#[tokio::test]
async fn multiple_watchers_all_notified() {
    let prop = Arc::new(ReactiveProperty::new(0i32));
    let success_count = Arc::new(AtomicU32::new(0));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let mut watcher = prop.watch();
        let count = Arc::clone(&success_count);
        handles.push(tokio::spawn(async move {
            while watcher.changed().await.unwrap() != 42 {}
            count.fetch_add(1, Ordering::Relaxed);
        }));
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
    prop.update(42);

    for h in handles {
        timeout(Duration::from_secs(1), h)
            .await
            .expect("监听者应该被唤醒")
            .unwrap();
    }
    assert_eq!(success_count.load(Ordering::Relaxed), 10);
}
