//! Snapshot semantics of signal emission.
//!
//! An emission walks the chain as it was when the signal fired: listeners
//! subscribed mid-emission wait for the next one, listeners unsubscribed
//! mid-emission are skipped, and every surviving node runs exactly once.

use std::cell::RefCell;
use std::rc::Rc;

use crate::handle::HandleType;
use crate::signal::SignalKind;
use crate::tests::support::harness;

#[test]
fn test_subscribe_during_emission_waits_for_next_signal() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    let handle = registry.wrap(addr, HandleType::Surface);

    let late_calls = Rc::new(RefCell::new(0));
    let late_calls_in = Rc::clone(&late_calls);
    registry
        .subscribe(
            handle,
            SignalKind::Commit,
            Box::new(move |registry, emitter, _| {
                let counter = Rc::clone(&late_calls_in);
                registry
                    .subscribe(
                        emitter,
                        SignalKind::Commit,
                        Box::new(move |_, _, _| {
                            *counter.borrow_mut() += 1;
                        }),
                    )
                    .unwrap();
            }),
        )
        .unwrap();

    control.emit(addr, SignalKind::Commit);
    registry.dispatch_events();
    // The listener planted mid-emission did not see the first signal.
    assert_eq!(*late_calls.borrow(), 0);

    control.emit(addr, SignalKind::Commit);
    registry.dispatch_events();
    assert_eq!(*late_calls.borrow(), 1);
}

#[test]
fn test_unsubscribe_during_emission_skips_pending_node() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    let handle = registry.wrap(addr, HandleType::Surface);

    let victim_calls = Rc::new(RefCell::new(0));
    let victim_calls_in = Rc::clone(&victim_calls);

    // Subscribe the victim second so the killer runs before it.
    let victim_id = Rc::new(RefCell::new(None));
    let victim_id_in = Rc::clone(&victim_id);
    registry
        .subscribe(
            handle,
            SignalKind::Commit,
            Box::new(move |registry, _, _| {
                if let Some(id) = victim_id_in.borrow_mut().take() {
                    registry.unsubscribe(id).unwrap();
                }
            }),
        )
        .unwrap();
    let id = registry
        .subscribe(
            handle,
            SignalKind::Commit,
            Box::new(move |_, _, _| {
                *victim_calls_in.borrow_mut() += 1;
            }),
        )
        .unwrap();
    *victim_id.borrow_mut() = Some(id);

    control.emit(addr, SignalKind::Commit);
    registry.dispatch_events();
    assert_eq!(*victim_calls.borrow(), 0);

    // And it stays gone.
    control.emit(addr, SignalKind::Commit);
    registry.dispatch_events();
    assert_eq!(*victim_calls.borrow(), 0);
}

#[test]
fn test_listener_may_unsubscribe_itself() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    let handle = registry.wrap(addr, HandleType::Surface);

    let calls = Rc::new(RefCell::new(0));
    let calls_in = Rc::clone(&calls);
    let self_id = Rc::new(RefCell::new(None));
    let self_id_in = Rc::clone(&self_id);
    let id = registry
        .subscribe(
            handle,
            SignalKind::Commit,
            Box::new(move |registry, _, _| {
                *calls_in.borrow_mut() += 1;
                if let Some(id) = self_id_in.borrow_mut().take() {
                    registry.unsubscribe(id).unwrap();
                }
            }),
        )
        .unwrap();
    *self_id.borrow_mut() = Some(id);

    control.emit(addr, SignalKind::Commit);
    control.emit(addr, SignalKind::Commit);
    registry.dispatch_events();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_duplicate_subscriptions_are_distinct_nodes() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    let handle = registry.wrap(addr, HandleType::Surface);

    let calls = Rc::new(RefCell::new(0));
    for _ in 0..2 {
        let calls_in = Rc::clone(&calls);
        registry
            .subscribe(
                handle,
                SignalKind::Commit,
                Box::new(move |_, _, _| {
                    *calls_in.borrow_mut() += 1;
                }),
            )
            .unwrap();
    }

    control.emit(addr, SignalKind::Commit);
    registry.dispatch_events();
    assert_eq!(*calls.borrow(), 2);
}

#[test]
fn test_reentrant_dispatch_is_a_noop() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    let handle = registry.wrap(addr, HandleType::Surface);

    let inner_routed = Rc::new(RefCell::new(None));
    let inner_routed_in = Rc::clone(&inner_routed);
    registry
        .subscribe(
            handle,
            SignalKind::Commit,
            Box::new(move |registry, _, _| {
                *inner_routed_in.borrow_mut() = Some(registry.dispatch_events());
            }),
        )
        .unwrap();

    control.emit(addr, SignalKind::Commit);
    registry.dispatch_events();
    assert_eq!(*inner_routed.borrow(), Some(0));
}

#[test]
fn test_signals_route_only_to_their_kind() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    let handle = registry.wrap(addr, HandleType::Surface);

    let commits = Rc::new(RefCell::new(0));
    let commits_in = Rc::clone(&commits);
    registry
        .subscribe(
            handle,
            SignalKind::Commit,
            Box::new(move |_, _, _| {
                *commits_in.borrow_mut() += 1;
            }),
        )
        .unwrap();

    control.emit(addr, SignalKind::Map);
    control.emit(addr, SignalKind::Commit);
    control.emit(addr, SignalKind::Unmap);
    registry.dispatch_events();
    assert_eq!(*commits.borrow(), 1);
}
