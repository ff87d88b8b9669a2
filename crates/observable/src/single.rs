use std::rc::Rc;

use crate::{Disposable, Emitter, EventSource, Observer, RxError};

/// Receives the outcome of a [`SingleValue`].
pub trait SingleObserver<T> {
    fn on_subscribe(&mut self, _handle: &Disposable) {}

    fn on_success(&mut self, value: T);

    fn on_error(&mut self, err: RxError) {
        log::warn!("unhandled {} error: {err}", err.as_label());
    }
}

/// A source that produces exactly one value or one error.
///
/// The first of `success`/`error` wins; later calls are dropped.
pub struct SingleValue<T> {
    producer: Rc<dyn Fn(&SingleEmitter<T>)>,
}

impl<T> Clone for SingleValue<T> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
        }
    }
}

/// Producer side of a [`SingleValue`] subscription.
pub struct SingleEmitter<T>(Emitter<T>);

impl<T> Clone for SingleEmitter<T> {
    fn clone(&self) -> Self {
        SingleEmitter(self.0.clone())
    }
}

impl<T: 'static> SingleEmitter<T> {
    pub fn success(&self, value: T) {
        if self.0.is_disposed() {
            log::debug!("dropping success after the single already resolved");
            return;
        }
        self.0.next(value);
        self.0.complete();
    }

    pub fn error(&self, err: RxError) {
        self.0.error(err);
    }

    pub fn is_disposed(&self) -> bool {
        self.0.is_disposed()
    }

    pub fn set_disposable(&self, d: Disposable) {
        self.0.set_disposable(d);
    }
}

/// Presents a [`SingleObserver`] to an [`Emitter`]; completion carries no information.
struct AsObserver<O>(O);

impl<T, O: SingleObserver<T>> Observer<T> for AsObserver<O> {
    fn on_subscribe(&mut self, handle: &Disposable) {
        self.0.on_subscribe(handle);
    }

    fn on_next(&mut self, value: T) {
        self.0.on_success(value);
    }

    fn on_error(&mut self, err: RxError) {
        self.0.on_error(err);
    }
}

struct SuccessOrError<S, E> {
    success: S,
    error: E,
}

impl<T, S: FnMut(T), E: FnMut(RxError)> SingleObserver<T> for SuccessOrError<S, E> {
    fn on_success(&mut self, value: T) {
        (self.success)(value)
    }

    fn on_error(&mut self, err: RxError) {
        (self.error)(err)
    }
}

impl<T: 'static> SingleValue<T> {
    /// Builds a single from a producer; an `Err` return is delivered as the error outcome.
    pub fn create<F>(producer: F) -> Self
    where
        F: Fn(&SingleEmitter<T>) -> Result<(), RxError> + 'static,
    {
        SingleValue {
            producer: Rc::new(move |emitter: &SingleEmitter<T>| {
                if let Err(err) = producer(emitter) {
                    emitter.error(err);
                }
            }),
        }
    }

    pub fn just(value: T) -> Self
    where
        T: Clone,
    {
        Self::create(move |emitter| {
            emitter.success(value.clone());
            Ok(())
        })
    }

    pub fn error(factory: impl Fn() -> RxError + 'static) -> Self {
        Self::create(move |_| Err(factory()))
    }

    pub fn subscribe(&self, observer: impl SingleObserver<T> + 'static) -> Disposable {
        let emitter = Emitter::new(Box::new(AsObserver(observer)));
        let handle = emitter.handle();
        log::trace!("subscribe single");
        (self.producer)(&SingleEmitter(emitter));
        handle
    }

    pub fn subscribe_by(
        &self,
        on_success: impl FnMut(T) + 'static,
        on_error: impl FnMut(RxError) + 'static,
    ) -> Disposable {
        self.subscribe(SuccessOrError {
            success: on_success,
            error: on_error,
        })
    }

    /// A one-item [`EventSource`]: `next` then `complete`, or the error.
    pub fn into_event_source(self) -> EventSource<T> {
        EventSource::from_producer(move |emitter| {
            (self.producer)(&SingleEmitter(emitter.clone()));
        })
    }
}
