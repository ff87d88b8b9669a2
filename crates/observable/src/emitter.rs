use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::{Disposable, DisposableGroup, Observer, RxError};

/// The producer side of one subscription.
///
/// Producers push signals through an `Emitter`; it drops anything sent after a
/// terminal signal or after the subscriber disposed. Clones refer to the same
/// subscription, so a producer may keep one around and emit later on the same thread.
pub struct Emitter<T>(Rc<State<T>>);

struct State<T> {
    observer: RefCell<Option<Box<dyn Observer<T>>>>,
    terminated: Rc<Cell<bool>>,
    // Terminal signal sent from inside a callback, delivered once that callback returns
    pending: RefCell<Option<Terminal>>,
    resources: Rc<DisposableGroup>,
    handle: Disposable,
}

enum Terminal {
    Complete,
    Error(RxError),
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Emitter(self.0.clone())
    }
}

impl<T: 'static> Emitter<T> {
    /// Wraps `observer` and hands it the subscription handle through `on_subscribe`.
    pub(crate) fn new(observer: Box<dyn Observer<T>>) -> Self {
        let resources = Rc::new(DisposableGroup::new());
        let emitter = Emitter(Rc::new_cyclic(|weak: &Weak<State<T>>| {
            let handle = {
                let resources = resources.clone();
                let weak = weak.clone();
                Disposable::new(move || {
                    log::trace!("subscription disposed");
                    resources.dispose();
                    if let Some(state) = weak.upgrade() {
                        // The slot is empty while a callback runs; that callback is put back only if not disposed
                        if let Ok(mut slot) = state.observer.try_borrow_mut() {
                            slot.take();
                        }
                    }
                })
            };
            State {
                observer: RefCell::new(Some(observer)),
                terminated: Rc::new(Cell::new(false)),
                pending: RefCell::new(None),
                resources,
                handle,
            }
        }));
        if let Some(mut observer) = emitter.take_observer() {
            observer.on_subscribe(&emitter.0.handle);
            emitter.restore(observer);
        }
        emitter
    }

    /// The handle the subscriber disposes to cancel this subscription.
    ///
    /// It also reads as disposed once a terminal signal went out.
    pub(crate) fn handle(&self) -> Disposable {
        self.0.handle.clone()
    }

    pub fn next(&self, value: T) {
        if self.is_done() {
            return;
        }
        let Some(mut observer) = self.take_observer() else {
            log::debug!("dropping next emitted from inside a callback");
            return;
        };
        observer.on_next(value);
        self.restore(observer);
    }

    pub fn error(&self, err: RxError) {
        if self.is_done() {
            log::debug!("dropping {} error after termination: {err}", err.as_label());
            return;
        }
        self.terminate(Terminal::Error(err));
    }

    pub fn complete(&self) {
        if self.is_done() {
            return;
        }
        self.terminate(Terminal::Complete);
    }

    /// True once the subscriber disposed or a terminal signal went out.
    pub fn is_disposed(&self) -> bool {
        self.is_done()
    }

    /// Attaches a resource released when the subscription is disposed or terminates.
    ///
    /// If the subscription is already over, `d` is disposed right away.
    pub fn set_disposable(&self, d: Disposable) {
        self.0.resources.add(d);
    }

    /// Registers `f` to run only if the subscriber disposes before a terminal signal.
    pub(crate) fn on_cancel(&self, f: impl FnOnce() + 'static) {
        let terminated = self.0.terminated.clone();
        self.set_disposable(Disposable::new(move || {
            if !terminated.get() {
                f();
            }
        }));
    }

    fn is_done(&self) -> bool {
        self.0.terminated.get() || self.0.handle.is_disposed()
    }

    fn take_observer(&self) -> Option<Box<dyn Observer<T>>> {
        self.0.observer.borrow_mut().take()
    }

    fn terminate(&self, terminal: Terminal) {
        self.0.terminated.set(true);
        match self.take_observer() {
            Some(observer) => self.deliver(observer, terminal),
            None => {
                // The observer is busy in a callback further up the stack
                *self.0.pending.borrow_mut() = Some(terminal);
            }
        }
    }

    fn deliver(&self, mut observer: Box<dyn Observer<T>>, terminal: Terminal) {
        match terminal {
            Terminal::Complete => observer.on_complete(),
            Terminal::Error(err) => observer.on_error(err),
        }
        self.0.handle.dispose();
    }

    /// Puts the observer back after a callback, unless the subscription ended meanwhile.
    fn restore(&self, observer: Box<dyn Observer<T>>) {
        let pending = self.0.pending.borrow_mut().take();
        match pending {
            Some(terminal) => self.deliver(observer, terminal),
            None if !self.is_done() => *self.0.observer.borrow_mut() = Some(observer),
            None => {}
        }
    }
}

/// Forwarding lets one subscription feed another, as `defer` and the hooks do.
impl<T: 'static> Observer<T> for Emitter<T> {
    fn on_subscribe(&mut self, handle: &Disposable) {
        self.set_disposable(handle.clone());
    }

    fn on_next(&mut self, value: T) {
        self.next(value);
    }

    fn on_complete(&mut self) {
        self.complete();
    }

    fn on_error(&mut self, err: RxError) {
        self.error(err);
    }
}

#[cfg(test)]
mod test {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use crate::{Callbacks, Disposable, Emitter, Observer, RxError};

    fn recorder() -> (Rc<RefCell<Vec<String>>>, Emitter<i32>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let cb = {
            let (a, b, c) = (log.clone(), log.clone(), log.clone());
            Callbacks::new()
                .next(move |v: i32| a.borrow_mut().push(v.to_string()))
                .complete(move || b.borrow_mut().push("complete".to_string()))
                .error(move |e| c.borrow_mut().push(format!("error {}", e.as_label())))
        };
        (log, Emitter::new(Box::new(cb)))
    }

    #[test]
    fn nothing_after_error() {
        let (log, emitter) = recorder();
        emitter.next(1);
        emitter.error(RxError::producer("boom"));
        emitter.next(2);
        emitter.complete();
        emitter.error(RxError::producer("again"));

        assert!(emitter.is_disposed());
        assert_eq!(*log.borrow(), vec!["1", "error producer_error"]);
    }

    #[test]
    fn nothing_after_dispose() {
        let (log, emitter) = recorder();
        let handle = emitter.handle();
        emitter.next(1);
        handle.dispose();
        emitter.next(2);
        emitter.complete();

        assert!(emitter.is_disposed());
        assert_eq!(*log.borrow(), vec!["1"]);
    }

    #[test]
    fn resources_released_on_terminal_and_late_ones_immediately() {
        let (_log, emitter) = recorder();
        let early = Disposable::empty();
        emitter.set_disposable(early.clone());
        assert!(!early.is_disposed());

        emitter.complete();
        assert!(early.is_disposed());

        let late = Disposable::empty();
        emitter.set_disposable(late.clone());
        assert!(late.is_disposed());
    }

    #[test]
    fn on_cancel_skipped_after_terminal() {
        let fired = Rc::new(Cell::new(0));
        let (_log, emitter) = recorder();
        {
            let fired = fired.clone();
            emitter.on_cancel(move || fired.set(fired.get() + 1));
        }
        emitter.complete();
        emitter.handle().dispose();
        assert_eq!(fired.get(), 0);

        let (_log, emitter) = recorder();
        {
            let fired = fired.clone();
            emitter.on_cancel(move || fired.set(fired.get() + 1));
        }
        emitter.handle().dispose();
        emitter.handle().dispose();
        assert_eq!(fired.get(), 1);
    }

    struct DisposeOnFirst {
        handle: Option<Disposable>,
        seen: Rc<RefCell<Vec<i32>>>,
    }

    impl Observer<i32> for DisposeOnFirst {
        fn on_subscribe(&mut self, handle: &Disposable) {
            self.handle = Some(handle.clone());
        }

        fn on_next(&mut self, value: i32) {
            self.seen.borrow_mut().push(value);
            if let Some(handle) = &self.handle {
                handle.dispose();
            }
        }
    }

    #[test]
    fn observer_may_dispose_from_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let emitter = Emitter::new(Box::new(DisposeOnFirst {
            handle: None,
            seen: seen.clone(),
        }));

        emitter.next(1);
        emitter.next(2);
        assert!(emitter.is_disposed());
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn handle_reads_disposed_after_terminal() {
        let (_log, emitter) = recorder();
        let handle = emitter.handle();
        assert!(!handle.is_disposed());
        emitter.complete();
        assert!(handle.is_disposed());

        let (_log, emitter) = recorder();
        let handle = emitter.handle();
        emitter.error(RxError::producer("boom"));
        assert!(handle.is_disposed());
    }

    /// Sends a terminal signal to its own subscription from inside `on_next`.
    struct EndsFromNext {
        emitter: Rc<RefCell<Option<Emitter<i32>>>>,
        end: fn(&Emitter<i32>),
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Observer<i32> for EndsFromNext {
        fn on_next(&mut self, value: i32) {
            self.log.borrow_mut().push(value.to_string());
            if let Some(emitter) = self.emitter.borrow().as_ref() {
                (self.end)(emitter);
                emitter.next(value + 100);
            }
            self.log.borrow_mut().push(format!("after {value}"));
        }

        fn on_complete(&mut self) {
            self.log.borrow_mut().push("complete".to_string());
        }

        fn on_error(&mut self, err: RxError) {
            self.log.borrow_mut().push(format!("error {}", err.as_label()));
        }
    }

    fn ends_from_next(end: fn(&Emitter<i32>)) -> Vec<String> {
        let slot = Rc::new(RefCell::new(None));
        let log = Rc::new(RefCell::new(Vec::new()));
        let emitter = Emitter::new(Box::new(EndsFromNext {
            emitter: slot.clone(),
            end,
            log: log.clone(),
        }));
        *slot.borrow_mut() = Some(emitter.clone());

        emitter.next(1);
        emitter.next(2);
        assert!(emitter.is_disposed());
        assert!(emitter.handle().is_disposed());
        slot.borrow_mut().take();
        let out = log.borrow().clone();
        out
    }

    #[test]
    fn terminal_sent_from_callback_arrives_after_it() {
        assert_eq!(
            ends_from_next(|e| e.complete()),
            vec!["1", "after 1", "complete"]
        );
        assert_eq!(
            ends_from_next(|e| e.error(RxError::producer("nested"))),
            vec!["1", "after 1", "error producer_error"]
        );
    }
}
