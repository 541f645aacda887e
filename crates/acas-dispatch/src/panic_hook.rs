//! Captures where a handler panicked so the recovery boundary can log it.
//!
//! By the time `catch_unwind` returns the stack is gone, so the backtrace
//! has to be taken inside the panic hook. The hook stores it in a
//! thread-local slot and then defers to whatever hook was installed before.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic;
use std::sync::Once;

pub(crate) struct PanicReport {
    pub location: String,
    pub backtrace: Backtrace,
}

thread_local! {
    static LAST_PANIC: RefCell<Option<PanicReport>> = const { RefCell::new(None) };
}

static INSTALL: Once = Once::new();

/// Install the capturing hook. Idempotent.
pub(crate) fn install() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "<unknown>".to_string());
            let report = PanicReport {
                location,
                backtrace: Backtrace::force_capture(),
            };
            LAST_PANIC.with(|slot| {
                if let Ok(mut slot) = slot.try_borrow_mut() {
                    *slot = Some(report);
                }
            });
            previous(info);
        }));
    });
}

/// Drop any report left over from an earlier panic on this thread.
pub(crate) fn clear() {
    let _ = take();
}

/// Take the report of the most recent panic on this thread.
pub(crate) fn take() -> Option<PanicReport> {
    LAST_PANIC.with(|slot| slot.try_borrow_mut().ok().and_then(|mut s| s.take()))
}

/// Best-effort text of a panic payload.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
