//! Integration tests for signals driving coalesced deferred calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use lattice_chrome_core::{ConnectionScope, DeferredCall, Signal, TaskQueue};

/// A window-like source with two signals feeding one deferred recompute.
struct Source {
    resized: Signal<(i32, i32)>,
    activated: Signal<bool>,
}

#[test]
fn many_signals_one_pass_per_turn() {
    let queue = Arc::new(TaskQueue::new());
    let source = Source {
        resized: Signal::new(),
        activated: Signal::new(),
    };
    let size = Arc::new(Mutex::new((0, 0)));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let size_for_pass = size.clone();
    let seen_for_pass = seen.clone();
    let update = Arc::new(DeferredCall::new(&queue, move || {
        seen_for_pass.lock().push(*size_for_pass.lock());
    }));

    let mut scope = ConnectionScope::new();
    let update_clone = update.clone();
    let size_clone = size.clone();
    scope.add(source.resized.connect_scoped(move |&s| {
        *size_clone.lock() = s;
        update_clone.schedule();
    }));
    let update_clone = update.clone();
    scope.add(source.activated.connect_scoped(move |_| {
        update_clone.schedule();
    }));

    source.resized.emit((800, 600));
    source.activated.emit(true);
    source.resized.emit((1024, 768));
    assert_eq!(queue.run_turn(), 1);

    source.activated.emit(false);
    assert_eq!(queue.run_turn(), 1);

    assert_eq!(*seen.lock(), vec![(1024, 768), (1024, 768)]);
    assert_eq!(update.stats().requests, 4);
    assert_eq!(update.stats().runs, 2);

    drop(scope);
    source.resized.emit((1, 1));
    assert_eq!(queue.run_turn(), 0);
}

#[test]
fn pass_triggering_itself_runs_next_turn() {
    let queue = Arc::new(TaskQueue::new());
    let shown = Arc::new(Signal::<()>::new());
    let runs = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<Arc<DeferredCall>>>> = Arc::new(Mutex::new(None));

    // The first pass makes a child visible, whose `shown` asks for another.
    let shown_for_pass = shown.clone();
    let runs_clone = runs.clone();
    let update = Arc::new(DeferredCall::new(&queue, move || {
        if runs_clone.fetch_add(1, Ordering::SeqCst) == 0 {
            shown_for_pass.emit(());
        }
    }));
    *slot.lock() = Some(update.clone());

    let slot_clone = slot.clone();
    let _guard = shown.connect_scoped(move |_| {
        if let Some(update) = slot_clone.lock().clone() {
            update.schedule();
        }
    });

    update.schedule();
    queue.run_turn();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(update.is_pending());

    assert_eq!(queue.run_until_idle(10), 1);
    assert_eq!(runs.load(Ordering::SeqCst), 2);

    slot.lock().take();
}

#[test]
fn dropped_queue_ignores_requests() {
    let queue = Arc::new(TaskQueue::new());
    let call = DeferredCall::new(&queue, || {});
    drop(queue);

    assert!(!call.schedule());
    assert!(!call.is_pending());
}
