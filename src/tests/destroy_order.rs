//! Destroy-signal ordering and listener teardown.
//!
//! When the native side destroys an object, every user destroy listener
//! runs in subscription order, observes the handle as already invalid,
//! and is released afterwards by the teardown pass.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::BindingError;
use crate::handle::HandleType;
use crate::signal::SignalKind;
use crate::tests::support::harness;

#[test]
fn test_destroy_listeners_run_in_subscription_order() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Output);
    let handle = registry.wrap(addr, HandleType::Output);

    let order = Rc::new(RefCell::new(Vec::new()));

    let order_a = Rc::clone(&order);
    let first = registry
        .subscribe(
            handle,
            SignalKind::Destroy,
            Box::new(move |registry, emitter, _| {
                // The finalizer already ran: the handle is dead here.
                assert!(!registry.is_valid(emitter));
                order_a.borrow_mut().push("first");
            }),
        )
        .unwrap();

    let order_b = Rc::clone(&order);
    registry
        .subscribe(
            handle,
            SignalKind::Destroy,
            Box::new(move |_, _, _| {
                order_b.borrow_mut().push("second");
            }),
        )
        .unwrap();

    control.destroy_object(addr);
    registry.dispatch_events();

    assert_eq!(*order.borrow(), vec!["first", "second"]);
    assert!(!registry.is_valid(handle));

    // Teardown released the nodes; a late unsubscribe is a caller defect.
    let err = registry.unsubscribe(first).unwrap_err();
    assert_eq!(err, BindingError::double_unsubscribe(SignalKind::Destroy));
    assert!(err.is_caller_defect());
}

#[test]
fn test_unsubscribe_twice_is_rejected() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    let handle = registry.wrap(addr, HandleType::Surface);

    let id = registry
        .subscribe(handle, SignalKind::Commit, Box::new(|_, _, _| {}))
        .unwrap();
    registry.unsubscribe(id).unwrap();
    assert_eq!(
        registry.unsubscribe(id),
        Err(BindingError::double_unsubscribe(SignalKind::Commit))
    );
}

#[test]
fn test_released_slot_reuse_does_not_alias_old_id() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    let handle = registry.wrap(addr, HandleType::Surface);

    let stale = registry
        .subscribe(handle, SignalKind::Commit, Box::new(|_, _, _| {}))
        .unwrap();
    registry.unsubscribe(stale).unwrap();

    // The slot is recycled for a new subscription at a new generation.
    let fresh = registry
        .subscribe(handle, SignalKind::Commit, Box::new(|_, _, _| {}))
        .unwrap();
    assert_ne!(stale, fresh);
    assert_eq!(
        registry.unsubscribe(stale),
        Err(BindingError::double_unsubscribe(SignalKind::Commit))
    );
    registry.unsubscribe(fresh).unwrap();
}

#[test]
fn test_destroy_of_unwrapped_object_is_ignored() {
    let (mut registry, control) = harness();
    let addr = control.spawn(HandleType::Surface);
    // Never wrapped: the binding layer has no state to update.
    control.destroy_object(addr);
    assert_eq!(registry.dispatch_events(), 1);
}
