use crate::{Disposable, RxError};

/// Receives the signals of one subscription.
///
/// Every method has a default, so implementors only override what they care about.
/// After `on_complete` or `on_error` no further calls are made.
pub trait Observer<T> {
    /// Hands over the subscription's handle before any other signal, so the
    /// observer can dispose while a synchronous source is still producing.
    fn on_subscribe(&mut self, _handle: &Disposable) {}

    fn on_next(&mut self, _value: T) {}

    fn on_complete(&mut self) {}

    fn on_error(&mut self, err: RxError) {
        log::warn!("unhandled {} error: {err}", err.as_label());
    }
}

/// Observer assembled from optional closures.
///
/// ```
/// use observable_primer::{Callbacks, EventSource};
///
/// EventSource::<()>::empty().subscribe_by(
///     Callbacks::new()
///         .next(|_| println!("next"))
///         .complete(|| println!("complete")),
/// );
/// ```
pub struct Callbacks<T> {
    subscribe: Option<Box<dyn FnMut(&Disposable)>>,
    next: Option<Box<dyn FnMut(T)>>,
    complete: Option<Box<dyn FnMut()>>,
    error: Option<Box<dyn FnMut(RxError)>>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Callbacks {
            subscribe: None,
            next: None,
            complete: None,
            error: None,
        }
    }
}

impl<T> Callbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribed(mut self, f: impl FnMut(&Disposable) + 'static) -> Self {
        self.subscribe = Some(Box::new(f));
        self
    }

    pub fn next(mut self, f: impl FnMut(T) + 'static) -> Self {
        self.next = Some(Box::new(f));
        self
    }

    pub fn complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.complete = Some(Box::new(f));
        self
    }

    pub fn error(mut self, f: impl FnMut(RxError) + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }
}

impl<T> Observer<T> for Callbacks<T> {
    fn on_subscribe(&mut self, handle: &Disposable) {
        if let Some(f) = self.subscribe.as_mut() {
            f(handle);
        }
    }

    fn on_next(&mut self, value: T) {
        if let Some(f) = self.next.as_mut() {
            f(value);
        }
    }

    fn on_complete(&mut self) {
        if let Some(f) = self.complete.as_mut() {
            f();
        }
    }

    fn on_error(&mut self, err: RxError) {
        match self.error.as_mut() {
            Some(f) => f(err),
            None => log::warn!("unhandled {} error: {err}", err.as_label()),
        }
    }
}

/// Observer wrapping a single `on_next` closure.
pub(crate) struct NextFn<F>(pub(crate) F);

impl<T, F: FnMut(T)> Observer<T> for NextFn<F> {
    fn on_next(&mut self, value: T) {
        (self.0)(value)
    }
}
