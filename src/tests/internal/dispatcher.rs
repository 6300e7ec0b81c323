//! 节流分发器测试：节奏策略、首次与完成事件、空闲回调、错误与状态回调。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::dispatcher::{CadencePolicy, ThrottledDispatcher};
use crate::downloader::DownloadStatus;

type Forwarded = Arc<Mutex<Vec<f64>>>;

fn recording(dispatcher: ThrottledDispatcher<f64>) -> (ThrottledDispatcher<f64>, Forwarded) {
    let forwarded: Forwarded = Arc::default();
    let sink = Arc::clone(&forwarded);
    let dispatcher = dispatcher.with_on_progress(move |factor: &f64| {
        sink.lock().unwrap().push(*factor);
    });
    (dispatcher, forwarded)
}

fn feed(dispatcher: &mut ThrottledDispatcher<f64>, factors: &[f64]) {
    for factor in factors {
        dispatcher.update(factor);
    }
}

#[test]
fn unthrottled_forwards_everything_but_completion_once() {
    let (mut dispatcher, forwarded) = recording(ThrottledDispatcher::unthrottled());
    feed(&mut dispatcher, &[0.0, 0.5, 1.0, 1.0]);
    assert_eq!(*forwarded.lock().unwrap(), vec![0.0, 0.5, 1.0]);
}

#[test]
fn completion_repeats_when_single_completion_disabled() {
    let (dispatcher, forwarded) = recording(ThrottledDispatcher::unthrottled());
    let mut dispatcher = dispatcher.force_single_completion(false);
    feed(&mut dispatcher, &[1.0, 1.0]);
    assert_eq!(forwarded.lock().unwrap().len(), 2);
}

#[test]
fn fixed_count_with_forced_first_update() {
    let (dispatcher, forwarded) = recording(ThrottledDispatcher::with_fixed_count(4));
    let mut dispatcher = dispatcher.force_first_update(true);
    feed(&mut dispatcher, &[0.0, 0.1, 0.3, 0.5, 0.9, 1.0]);
    assert_eq!(*forwarded.lock().unwrap(), vec![0.0, 0.3, 0.9, 1.0]);
}

#[test]
fn fixed_count_without_forced_first_update() {
    let (mut dispatcher, forwarded) = recording(ThrottledDispatcher::with_fixed_count(4));
    feed(&mut dispatcher, &[0.0, 0.1, 0.3, 0.5, 0.9, 1.0]);
    assert_eq!(*forwarded.lock().unwrap(), vec![0.3, 0.9, 1.0]);
}

#[test]
fn fixed_count_zero_is_treated_as_one() {
    let dispatcher = ThrottledDispatcher::<f64>::with_fixed_count(0);
    assert_eq!(dispatcher.policy(), CadencePolicy::FixedCount(1));
}

#[test]
fn cooldown_forwards_first_event_then_waits() {
    let (mut dispatcher, forwarded) =
        recording(ThrottledDispatcher::with_cooldown(Duration::from_secs(60)));
    feed(&mut dispatcher, &[0.1, 0.2, 0.3, 1.0]);
    assert_eq!(*forwarded.lock().unwrap(), vec![0.1, 1.0]);
}

#[test]
fn cooldown_after_start_holds_until_elapsed() {
    let (mut dispatcher, forwarded) =
        recording(ThrottledDispatcher::with_cooldown(Duration::from_millis(20)));
    dispatcher.start();
    dispatcher.update(&0.1);
    assert!(forwarded.lock().unwrap().is_empty());

    std::thread::sleep(Duration::from_millis(30));
    dispatcher.update(&0.2);
    assert_eq!(*forwarded.lock().unwrap(), vec![0.2]);
}

#[test]
fn idle_only_fires_while_stopped() {
    let idles = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&idles);
    let mut dispatcher = ThrottledDispatcher::<f64>::unthrottled()
        .with_on_idle(move || *counter.lock().unwrap() += 1);

    dispatcher.idle();
    dispatcher.start();
    assert!(dispatcher.is_running());
    dispatcher.idle();
    dispatcher.stop();
    dispatcher.idle();

    assert_eq!(*idles.lock().unwrap(), 2);
}

#[test]
fn detached_idle_hook_follows_the_dispatcher_timer() {
    let idles = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&idles);
    let mut dispatcher = ThrottledDispatcher::<f64>::unthrottled()
        .with_on_idle(move || *counter.lock().unwrap() += 1);

    let mut hook = dispatcher.take_idle_hook();
    assert!(hook.is_wired());

    hook.idle();
    dispatcher.start();
    hook.idle();
    dispatcher.stop();
    hook.idle();
    // 已分离，分发器自身不再触发
    dispatcher.idle();

    assert_eq!(*idles.lock().unwrap(), 2);
}

#[test]
fn error_and_status_handlers_are_optional() {
    let mut bare = ThrottledDispatcher::<f64>::unthrottled();
    bare.error(&std::io::Error::other("ignored"));
    bare.status_changed(DownloadStatus::Requesting);

    let messages = Arc::new(Mutex::new(Vec::new()));
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let (m, s) = (Arc::clone(&messages), Arc::clone(&statuses));
    let mut dispatcher = ThrottledDispatcher::<f64>::unthrottled()
        .with_on_error(move |err| m.lock().unwrap().push(err.to_string()))
        .with_on_status_change(move |status| s.lock().unwrap().push(status));

    dispatcher.error(&std::io::Error::other("boom"));
    dispatcher.status_changed(DownloadStatus::Streaming);

    assert_eq!(*messages.lock().unwrap(), vec!["boom".to_string()]);
    assert_eq!(*statuses.lock().unwrap(), vec![DownloadStatus::Streaming]);
}
