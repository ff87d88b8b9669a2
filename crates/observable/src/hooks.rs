//! Side-effect hooks. Each wraps a source and leaves its emissions untouched.

use std::rc::Rc;

use crate::{Disposable, Emitter, EventSource, Observer, RxError};

/// Runs the tap closures before forwarding each signal downstream.
struct Tap<T> {
    downstream: Emitter<T>,
    next: Option<Rc<dyn Fn(&T)>>,
    complete: Option<Rc<dyn Fn()>>,
    error: Option<Rc<dyn Fn(&RxError)>>,
}

impl<T: 'static> Observer<T> for Tap<T> {
    fn on_subscribe(&mut self, handle: &Disposable) {
        self.downstream.set_disposable(handle.clone());
    }

    fn on_next(&mut self, value: T) {
        if let Some(f) = &self.next {
            f(&value);
        }
        self.downstream.next(value);
    }

    fn on_complete(&mut self) {
        if let Some(f) = &self.complete {
            f();
        }
        self.downstream.complete();
    }

    fn on_error(&mut self, err: RxError) {
        if let Some(f) = &self.error {
            f(&err);
        }
        self.downstream.error(err);
    }
}

impl<T: 'static> EventSource<T> {
    fn tap(
        &self,
        next: Option<Rc<dyn Fn(&T)>>,
        complete: Option<Rc<dyn Fn()>>,
        error: Option<Rc<dyn Fn(&RxError)>>,
    ) -> Self {
        let upstream = self.clone();
        Self::from_producer(move |emitter| {
            let tap = Tap {
                downstream: emitter.clone(),
                next: next.clone(),
                complete: complete.clone(),
                error: error.clone(),
            };
            upstream.subscribe(tap);
        })
    }

    pub fn do_on_next(&self, f: impl Fn(&T) + 'static) -> Self {
        self.tap(Some(Rc::new(f)), None, None)
    }

    pub fn do_on_complete(&self, f: impl Fn() + 'static) -> Self {
        self.tap(None, Some(Rc::new(f)), None)
    }

    pub fn do_on_error(&self, f: impl Fn(&RxError) + 'static) -> Self {
        self.tap(None, None, Some(Rc::new(f)))
    }

    /// Runs `f` on every subscribe, before the upstream starts producing.
    pub fn do_on_subscribe(&self, f: impl Fn() + 'static) -> Self {
        let upstream = self.clone();
        Self::from_producer(move |emitter| {
            f();
            upstream.subscribe(emitter.clone());
        })
    }

    /// Runs `f` when the subscriber disposes before the source terminated.
    pub fn do_on_dispose(&self, f: impl Fn() + 'static) -> Self {
        let upstream = self.clone();
        let f = Rc::new(f);
        Self::from_producer(move |emitter| {
            let f = f.clone();
            emitter.on_cancel(move || f());
            upstream.subscribe(emitter.clone());
        })
    }
}
