use futures::future::{AbortHandle, Abortable, Aborted};
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};
use wasm_bindgen_futures::spawn_local;

#[derive(Default)]
struct ScopeInner {
    closed: bool,
    next_id: u64,
    tasks: HashMap<u64, AbortHandle>,
    /// Named slots hold at most one live task each
    slots: HashMap<&'static str, u64>,
}

impl ScopeInner {
    fn finish(&mut self, id: u64) {
        self.tasks.remove(&id);
        self.slots.retain(|_, task| *task != id);
    }
}

/// Owns the in-flight requests of one view.
///
/// Closing the scope aborts every task still pending, so a response that
/// arrives after the view is gone never reaches its state handles.
#[derive(Clone, Default)]
pub struct RequestScope {
    inner: Rc<RefCell<ScopeInner>>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future` on the browser event loop until it finishes or the scope
    /// closes.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        if let Some(task) = self.track(None, future) {
            spawn_local(async move {
                let _ = task.await;
            });
        }
    }

    /// Like [`spawn`](Self::spawn), but aborts whatever task still occupies
    /// `slot` first. A reload supersedes the load it replaces.
    pub fn spawn_in<F>(&self, slot: &'static str, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        if let Some(task) = self.track(Some(slot), future) {
            spawn_local(async move {
                let _ = task.await;
            });
        }
    }

    /// Register `future` with the scope and return it wrapped so that it
    /// resolves to `Err(Aborted)` once cancelled. Returns `None` when the
    /// scope is already closed.
    pub fn track<F>(
        &self,
        slot: Option<&'static str>,
        future: F,
    ) -> Option<impl Future<Output = Result<F::Output, Aborted>>>
    where
        F: Future,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut inner = self.inner.borrow_mut();
            if inner.closed {
                return None;
            }
            let id = inner.next_id;
            inner.next_id += 1;
            if let Some(slot) = slot {
                if let Some(previous) = inner.slots.insert(slot, id) {
                    if let Some(stale) = inner.tasks.remove(&previous) {
                        stale.abort();
                    }
                }
            }
            inner.tasks.insert(id, handle);
            id
        };

        let scope: Weak<RefCell<ScopeInner>> = Rc::downgrade(&self.inner);
        Some(async move {
            let result = Abortable::new(future, registration).await;
            if let Some(inner) = scope.upgrade() {
                inner.borrow_mut().finish(id);
            }
            result
        })
    }

    /// Abort every pending task and refuse new ones
    pub fn close(&self) {
        let handles: Vec<AbortHandle> = {
            let mut inner = self.inner.borrow_mut();
            inner.closed = true;
            inner.slots.clear();
            inner.tasks.drain().map(|(_, handle)| handle).collect()
        };
        if !handles.is_empty() {
            log::debug!(target: "request-scope", "aborting {} pending requests", handles.len());
        }
        for handle in handles {
            handle.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }
}

impl PartialEq for RequestScope {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_completed_task_leaves_scope() {
        let scope = RequestScope::new();
        let task = scope.track(None, async { 7 }).unwrap();
        assert_eq!(scope.pending(), 1);

        assert_eq!(block_on(task), Ok(7));
        assert_eq!(scope.pending(), 0);
    }

    #[test]
    fn test_close_aborts_pending_task_before_it_writes() {
        let scope = RequestScope::new();
        let written = Rc::new(Cell::new(false));
        let (sender, receiver) = oneshot::channel::<u32>();

        let task = {
            let written = written.clone();
            scope
                .track(None, async move {
                    if receiver.await.is_ok() {
                        written.set(true);
                    }
                })
                .unwrap()
        };

        scope.close();
        let _ = sender.send(1);

        assert_eq!(block_on(task), Err(Aborted));
        assert!(!written.get());
        assert_eq!(scope.pending(), 0);
    }

    #[test]
    fn test_closed_scope_refuses_new_tasks() {
        let scope = RequestScope::new();
        scope.close();
        assert!(scope.is_closed());
        assert!(scope.track(None, async {}).is_none());
    }

    #[test]
    fn test_slot_supersedes_previous_task() {
        let scope = RequestScope::new();
        let (_first_sender, first_receiver) = oneshot::channel::<u32>();

        let first = scope.track(Some("load"), first_receiver).unwrap();
        let second = scope.track(Some("load"), async { 2 }).unwrap();

        assert!(block_on(first).is_err());
        assert_eq!(block_on(second), Ok(2));
        assert_eq!(scope.pending(), 0);
    }

    #[test]
    fn test_unslotted_tasks_run_side_by_side() {
        let scope = RequestScope::new();
        let a = scope.track(None, async { 1 }).unwrap();
        let b = scope.track(None, async { 2 }).unwrap();
        assert_eq!(scope.pending(), 2);

        assert_eq!(block_on(a), Ok(1));
        assert_eq!(block_on(b), Ok(2));
    }
}
