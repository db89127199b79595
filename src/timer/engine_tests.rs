//! Tests for the timer engine state machine
//!
//! Every scenario drives the engine through a manually-fired scheduler so
//! tick delivery is exact and no wall-clock time is involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::clock::TimeFormat;
use crate::error::TimerError;
use crate::scheduler::{ManualScheduler, Scheduler, Subscription, TickFn};

use super::{Timer, TimerOptions, TimerStatus};

/// Build a timer driven by a shared manual scheduler.
fn manual_timer(total_ms: u64, options: TimerOptions) -> (Timer, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let timer = Timer::new(total_ms, options.scheduler(Arc::new(scheduler.clone())))
        .expect("options are valid");
    (timer, scheduler)
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let bump = Arc::clone(&count);
    (count, move || {
        bump.fetch_add(1, Ordering::SeqCst);
    })
}

fn tick_recorder() -> (Arc<Mutex<Vec<u64>>>, impl Fn(u64) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |remaining| {
        sink.lock().unwrap().push(remaining);
    })
}

/// Keeps delivering after its subscription is stopped, modelling a tick
/// already queued for delivery when the engine leaves the running state.
#[derive(Clone, Default)]
struct StuckScheduler {
    slot: Arc<Mutex<Option<TickFn>>>,
}

impl StuckScheduler {
    fn fire(&self, elapsed_ms: u64) {
        let on_tick = self.slot.lock().unwrap().clone();
        if let Some(on_tick) = on_tick {
            on_tick(elapsed_ms);
        }
    }
}

impl Scheduler for StuckScheduler {
    fn start(&self, on_tick: TickFn) -> Subscription {
        *self.slot.lock().unwrap() = Some(on_tick);
        Subscription::new(|| {})
    }
}

#[test]
fn basic_countdown_finishes_after_exact_ticks() {
    let (ticks, on_tick) = tick_recorder();
    let (completes, on_complete) = counter();
    let (timer, scheduler) = manual_timer(
        5_000,
        TimerOptions::new().on_tick(on_tick).on_complete(on_complete),
    );

    timer.start();
    for _ in 0..5 {
        scheduler.fire(1_000);
    }

    assert_eq!(timer.status(), TimerStatus::Finished);
    assert_eq!(timer.remaining_ms(), 0);
    assert_eq!(timer.progress(), 100.0);
    assert_eq!(*ticks.lock().unwrap(), vec![4_000, 3_000, 2_000, 1_000, 0]);
    assert_eq!(completes.load(Ordering::SeqCst), 1);
}

#[test]
fn start_is_noop_while_running() {
    let (starts, on_start) = counter();
    let (timer, scheduler) = manual_timer(5_000, TimerOptions::new().on_start(on_start));

    timer.start();
    scheduler.fire(1_000);
    timer.start();

    assert!(timer.is_running());
    assert_eq!(timer.remaining_ms(), 4_000, "running start must not refill");
    assert_eq!(starts.load(Ordering::SeqCst), 1);
}

#[test]
fn pause_preserves_remainder_and_resume_continues() {
    let (starts, on_start) = counter();
    let (timer, scheduler) = manual_timer(3_000, TimerOptions::new().on_start(on_start));

    timer.start();
    scheduler.fire(1_000);
    timer.pause();

    assert!(timer.is_paused());
    assert_eq!(timer.remaining_ms(), 2_000);

    // ticks fired while paused are not consumed
    scheduler.fire(1_000);
    assert_eq!(timer.remaining_ms(), 2_000);

    timer.start();
    scheduler.fire(1_000);
    assert_eq!(timer.remaining_ms(), 1_000, "resume must keep the remainder");
    assert_eq!(starts.load(Ordering::SeqCst), 1, "resume is not a fresh start");
}

#[test]
fn pause_stop_reset_are_idempotent() {
    let (pauses, on_pause) = counter();
    let (stops, on_stop) = counter();
    let (resets, on_reset) = counter();
    let (timer, scheduler) = manual_timer(
        4_000,
        TimerOptions::new()
            .on_pause(on_pause)
            .on_stop(on_stop)
            .on_reset(on_reset),
    );

    timer.start();
    scheduler.fire(1_000);
    timer.pause();
    timer.pause();
    assert!(timer.is_paused());
    assert_eq!(timer.remaining_ms(), 3_000);
    assert_eq!(pauses.load(Ordering::SeqCst), 1);

    timer.stop();
    timer.stop();
    assert!(timer.is_idle());
    assert_eq!(timer.remaining_ms(), 3_000);
    assert_eq!(stops.load(Ordering::SeqCst), 1);

    timer.reset();
    timer.reset();
    assert!(timer.is_idle());
    assert_eq!(timer.remaining_ms(), 4_000);
    assert_eq!(timer.progress(), 0.0);
    assert_eq!(resets.load(Ordering::SeqCst), 2, "reset is total from any state");
}

#[test]
fn stop_keeps_remainder_and_fresh_start_refills() {
    let (starts, on_start) = counter();
    let (timer, scheduler) = manual_timer(3_000, TimerOptions::new().on_start(on_start));

    timer.start();
    scheduler.fire(1_000);
    timer.stop();

    assert!(timer.is_idle());
    assert_eq!(timer.remaining_ms(), 2_000);
    assert!(timer.progress() > 0.0);

    timer.start();
    assert_eq!(timer.remaining_ms(), 3_000, "idle start refills the clock");
    assert_eq!(starts.load(Ordering::SeqCst), 2);
}

#[test]
fn start_after_finish_refills() {
    let (starts, on_start) = counter();
    let (timer, scheduler) = manual_timer(2_000, TimerOptions::new().on_start(on_start));

    timer.start();
    scheduler.fire(2_000);
    assert!(timer.is_finished());

    timer.start();
    assert!(timer.is_running());
    assert_eq!(timer.remaining_ms(), 2_000);
    assert_eq!(starts.load(Ordering::SeqCst), 2);
}

#[test]
fn loop_mode_wraps_and_never_finishes() {
    let (ticks, on_tick) = tick_recorder();
    let (completes, on_complete) = counter();
    let (timer, scheduler) = manual_timer(
        2_000,
        TimerOptions::new()
            .looping(true)
            .on_tick(on_tick)
            .on_complete(on_complete),
    );

    timer.start();
    scheduler.fire(1_000);
    scheduler.fire(1_000);
    scheduler.fire(500);

    assert_eq!(timer.status(), TimerStatus::Running);
    assert_eq!(timer.remaining_ms(), 1_500, "countdown wrapped past zero");
    assert_eq!(completes.load(Ordering::SeqCst), 0);

    let observed = ticks.lock().unwrap();
    assert_eq!(*observed, vec![1_000, 0, 1_500]);
    let wraps = observed.iter().filter(|&&r| r == 0).count();
    assert_eq!(wraps, 1, "exactly one internal restart");
}

#[test]
fn add_time_clamps_at_total() {
    let (timer, scheduler) = manual_timer(5_000, TimerOptions::new());

    timer.start();
    scheduler.fire(1_000);
    timer.add_time(10_000);

    assert!(timer.is_running());
    assert_eq!(timer.remaining_ms(), 5_000);
    assert_eq!(timer.progress(), 0.0);
}

#[test]
fn add_time_while_finished_parks_paused() {
    let (starts, on_start) = counter();
    let (completes, on_complete) = counter();
    let (timer, scheduler) = manual_timer(
        1_000,
        TimerOptions::new().on_start(on_start).on_complete(on_complete),
    );

    timer.start();
    scheduler.fire(1_000);
    assert!(timer.is_finished());

    timer.add_time(500);
    assert_eq!(timer.status(), TimerStatus::Paused);
    assert_eq!(timer.remaining_ms(), 500);
    assert_eq!(starts.load(Ordering::SeqCst), 1, "mutation must not start");
    assert_eq!(completes.load(Ordering::SeqCst), 1, "mutation must not complete");
}

#[test]
fn add_zero_while_finished_stays_finished() {
    let (timer, scheduler) = manual_timer(1_000, TimerOptions::new());

    timer.start();
    scheduler.fire(1_000);
    timer.add_time(0);

    assert!(timer.is_finished());
    assert_eq!(timer.remaining_ms(), 0);
}

#[test]
fn subtract_time_drains_to_completion_while_running() {
    let (completes, on_complete) = counter();
    let (timer, scheduler) = manual_timer(5_000, TimerOptions::new().on_complete(on_complete));

    timer.start();
    scheduler.fire(1_000);
    timer.subtract_time(9_000);

    assert!(timer.is_finished());
    assert_eq!(timer.remaining_ms(), 0);
    assert_eq!(completes.load(Ordering::SeqCst), 1);
    assert!(!scheduler.is_subscribed(), "completion releases the ticker");
}

#[test]
fn subtract_time_while_paused_finishes_silently() {
    let (completes, on_complete) = counter();
    let (timer, scheduler) = manual_timer(2_000, TimerOptions::new().on_complete(on_complete));

    timer.start();
    scheduler.fire(500);
    timer.pause();
    timer.subtract_time(5_000);

    assert!(timer.is_finished());
    assert_eq!(timer.remaining_ms(), 0);
    assert_eq!(completes.load(Ordering::SeqCst), 0);
}

#[test]
fn set_time_recomputes_status() {
    let (completes, on_complete) = counter();
    let (timer, scheduler) = manual_timer(4_000, TimerOptions::new().on_complete(on_complete));

    // draining while running finishes silently and releases the ticker
    timer.start();
    scheduler.fire(1_000);
    timer.set_time(0);
    assert!(timer.is_finished());
    assert_eq!(completes.load(Ordering::SeqCst), 0);
    assert!(!scheduler.is_subscribed());

    // restoring a remainder on a finished timer parks it paused
    timer.set_time(700);
    assert_eq!(timer.status(), TimerStatus::Paused);
    assert_eq!(timer.remaining_ms(), 700);

    // values above the total clamp to it
    timer.set_time(999_999);
    assert_eq!(timer.remaining_ms(), 4_000);
}

#[test]
fn stale_tick_after_pause_is_ignored() {
    let scheduler = StuckScheduler::default();
    let timer = Timer::new(
        3_000,
        TimerOptions::new().scheduler(Arc::new(scheduler.clone())),
    )
    .expect("options are valid");

    timer.start();
    scheduler.fire(1_000);
    timer.pause();

    // the stuck subscription still delivers; the engine must no-op it
    scheduler.fire(1_000);
    assert!(timer.is_paused());
    assert_eq!(timer.remaining_ms(), 2_000);
}

#[test]
fn toggle_alternates_start_and_pause() {
    let (timer, scheduler) = manual_timer(3_000, TimerOptions::new());

    timer.toggle();
    assert!(timer.is_running());

    scheduler.fire(1_000);
    timer.toggle();
    assert!(timer.is_paused());
    assert_eq!(timer.remaining_ms(), 2_000);

    timer.toggle();
    assert!(timer.is_running());
    assert_eq!(timer.remaining_ms(), 2_000);
}

#[test]
fn restart_fires_reset_then_start() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let reset_log = Arc::clone(&events);
    let start_log = Arc::clone(&events);
    let (timer, scheduler) = manual_timer(
        3_000,
        TimerOptions::new()
            .on_reset(move || reset_log.lock().unwrap().push("reset"))
            .on_start(move || start_log.lock().unwrap().push("start")),
    );

    timer.start();
    scheduler.fire(1_000);
    timer.restart();

    assert!(timer.is_running());
    assert_eq!(timer.remaining_ms(), 3_000);
    assert_eq!(*events.lock().unwrap(), vec!["start", "reset", "start"]);
}

#[test]
fn zero_total_completes_on_first_tick() {
    let (completes, on_complete) = counter();
    let (timer, scheduler) = manual_timer(0, TimerOptions::new().on_complete(on_complete));

    timer.start();
    assert!(timer.is_running());

    scheduler.fire(100);
    assert!(timer.is_finished());
    assert_eq!(timer.remaining_ms(), 0);
    assert_eq!(timer.progress(), 0.0, "zero-length timers report no progress");
    assert_eq!(completes.load(Ordering::SeqCst), 1);
}

#[test]
fn zero_interval_is_rejected_at_construction() {
    let result = Timer::new(1_000, TimerOptions::new().interval_ms(0));
    assert!(matches!(result, Err(TimerError::ZeroInterval)));
}

#[test]
fn remaining_is_monotonic_and_hits_zero_before_finished() {
    let (timer, scheduler) = manual_timer(10_000, TimerOptions::new());

    timer.start();
    let mut last = timer.remaining_ms();
    for elapsed in [300, 1_200, 50, 5_000] {
        scheduler.fire(elapsed);
        let remaining = timer.remaining_ms();
        assert!(remaining <= last, "remaining must never increase under ticks");
        assert!((0.0..=100.0).contains(&timer.progress()));
        assert!(!timer.is_finished());
        last = remaining;
    }

    scheduler.fire(last);
    assert_eq!(timer.remaining_ms(), 0, "countdown lands exactly on zero");
    assert!(timer.is_finished());
    assert_eq!(timer.progress(), 100.0);
}

#[test]
fn subscription_exists_iff_running() {
    let (timer, scheduler) = manual_timer(3_000, TimerOptions::new());
    assert!(!scheduler.is_subscribed());

    timer.start();
    assert!(scheduler.is_subscribed());

    timer.pause();
    assert!(!scheduler.is_subscribed());

    timer.start();
    scheduler.fire(3_000);
    assert!(timer.is_finished());
    assert!(!scheduler.is_subscribed());
}

#[test]
fn auto_start_runs_immediately() {
    let (starts, on_start) = counter();
    let scheduler = ManualScheduler::new();
    let timer = Timer::new(
        2_000,
        TimerOptions::new()
            .auto_start(true)
            .on_start(on_start)
            .scheduler(Arc::new(scheduler.clone())),
    )
    .expect("options are valid");

    assert!(timer.is_running());
    assert!(scheduler.is_subscribed());
    assert_eq!(starts.load(Ordering::SeqCst), 1);
}

#[test]
fn snapshot_serializes_canonical_fields() {
    let (timer, scheduler) = manual_timer(4_000, TimerOptions::new());

    timer.start();
    scheduler.fire(1_000);
    let snapshot = timer.snapshot();

    assert_eq!(snapshot.status, TimerStatus::Running);
    assert_eq!(snapshot.remaining_ms, 3_000);
    assert_eq!(snapshot.total_ms, 4_000);
    assert_eq!(snapshot.time, "0:03");
    assert_eq!(snapshot.progress, 25.0);

    let json = serde_json::to_value(&snapshot).expect("snapshot serializes");
    assert_eq!(json["status"], "running");
    assert_eq!(json["remaining_ms"], 3_000);
}

#[test]
fn custom_format_flows_through_time() {
    let format = TimeFormat::Custom(Arc::new(|ms| format!("{ms}ms left")));
    let (timer, scheduler) = manual_timer(2_000, TimerOptions::new().format(format));

    timer.start();
    scheduler.fire(500);
    assert_eq!(timer.time(), "1500ms left");
}

#[tokio::test]
async fn countdown_finishes_with_interval_scheduler() {
    let (done_tx, mut done_rx) = tokio::sync::watch::channel(false);
    let timer = Timer::new(
        100,
        TimerOptions::new().interval_ms(20).on_complete(move || {
            let _ = done_tx.send(true);
        }),
    )
    .expect("options are valid");

    timer.start();
    tokio::time::timeout(std::time::Duration::from_secs(5), done_rx.changed())
        .await
        .expect("countdown completes well within the timeout")
        .expect("completion sender stays alive");

    assert!(timer.is_finished());
    assert_eq!(timer.remaining_ms(), 0);
}

#[test]
fn callbacks_may_reenter_the_control_surface() {
    // a completion handler that immediately rearms the timer must not
    // deadlock against the state lock
    let scheduler = ManualScheduler::new();
    let rearmed: Arc<Mutex<Option<Timer>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&rearmed);
    let timer = Timer::new(
        1_000,
        TimerOptions::new()
            .scheduler(Arc::new(scheduler.clone()))
            .on_complete(move || {
                if let Some(timer) = slot.lock().unwrap().as_ref() {
                    timer.start();
                }
            }),
    )
    .expect("options are valid");
    *rearmed.lock().unwrap() = Some(timer.clone());

    timer.start();
    scheduler.fire(1_000);

    assert!(timer.is_running(), "completion handler restarted the timer");
    assert_eq!(timer.remaining_ms(), 1_000);
}
