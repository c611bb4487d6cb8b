use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use super::{BatchReport, SessionView, TapSession};
use crate::tap_engine::RawSample;

/// A session reachable from more than one execution context.
///
/// Detector state, cursor and history have no safe partial update, so one lock
/// covers all three. Pick `NoopRawMutex` when everything runs on one executor and
/// `CriticalSectionRawMutex` when the sensor callback can preempt the redraw.
pub struct SharedTapSession<M: RawMutex> {
    inner: Mutex<M, RefCell<TapSession>>,
}

impl<M: RawMutex> SharedTapSession<M> {
    pub fn new(session: TapSession) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(session)),
        }
    }

    pub fn handle_batch(&self, samples: &[RawSample], batch_ms: u64) -> BatchReport {
        self.inner
            .lock(|session| session.borrow_mut().handle_batch(samples, batch_ms))
    }

    pub fn view(&self) -> SessionView {
        self.inner.lock(|session| session.borrow().view())
    }

    pub fn with_session<R>(&self, f: impl FnOnce(&mut TapSession) -> R) -> R {
        self.inner.lock(|session| f(&mut session.borrow_mut()))
    }

    pub fn into_inner(self) -> TapSession {
        self.inner.into_inner().into_inner()
    }
}
