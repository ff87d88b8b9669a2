use std::rc::Rc;

use crate::{observer::NextFn, Callbacks, Disposable, Emitter, Observer, RxError};

/// A cold, unicast, push-based sequence.
///
/// An `EventSource` is only a description of how to produce values. Nothing happens
/// until [`subscribe`](EventSource::subscribe), and every subscription runs the
/// producer again from scratch.
///
/// ```
/// use observable_primer::{Callbacks, EventSource};
///
/// EventSource::range(1, 3).subscribe_by(
///     Callbacks::new()
///         .next(|v| println!("{v}"))
///         .complete(|| println!("completed")),
/// );
/// ```
pub struct EventSource<T> {
    producer: Rc<dyn Fn(&Emitter<T>)>,
}

impl<T> Clone for EventSource<T> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
        }
    }
}

impl<T: 'static> EventSource<T> {
    pub(crate) fn from_producer(producer: impl Fn(&Emitter<T>) + 'static) -> Self {
        Self {
            producer: Rc::new(producer),
        }
    }

    /// Builds a source from a producer closure.
    ///
    /// The emitter ignores anything sent after `error` or `complete`, and an `Err`
    /// returned by the producer is delivered as `on_error` if the subscription is still live.
    pub fn create<F>(producer: F) -> Self
    where
        F: Fn(&Emitter<T>) -> Result<(), RxError> + 'static,
    {
        Self::from_producer(move |emitter| {
            if let Err(err) = producer(emitter) {
                emitter.error(err);
            }
        })
    }

    /// Emits every item in order, then completes.
    pub fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let items: Rc<[T]> = items.into_iter().collect();
        Self::from_producer(move |emitter| {
            for item in items.iter() {
                if emitter.is_disposed() {
                    return;
                }
                emitter.next(item.clone());
            }
            emitter.complete();
        })
    }

    pub fn just(item: T) -> Self
    where
        T: Clone,
    {
        Self::from_iter(Some(item))
    }

    pub fn empty() -> Self {
        Self::from_producer(|emitter| emitter.complete())
    }

    pub fn never() -> Self {
        Self::from_producer(|_| {})
    }

    /// Fails every subscription with a fresh error from `factory`.
    pub fn error(factory: impl Fn() -> RxError + 'static) -> Self {
        Self::from_producer(move |emitter| emitter.error(factory()))
    }

    /// Calls `factory` on every subscribe and subscribes to the source it returns.
    pub fn defer<F>(factory: F) -> Self
    where
        F: Fn() -> EventSource<T> + 'static,
    {
        Self::from_producer(move |emitter| {
            // The upstream handle reaches `emitter` through `on_subscribe`
            factory().subscribe(emitter.clone());
        })
    }

    /// Runs the producer for `observer`.
    ///
    /// The returned handle is the one passed to `on_subscribe`; it reads as disposed
    /// once the subscription terminated.
    pub fn subscribe(&self, observer: impl Observer<T> + 'static) -> Disposable {
        let emitter = Emitter::new(Box::new(observer));
        let handle = emitter.handle();
        log::trace!("subscribe");
        (self.producer)(&emitter);
        handle
    }

    pub fn subscribe_by(&self, callbacks: Callbacks<T>) -> Disposable {
        self.subscribe(callbacks)
    }

    pub fn subscribe_next(&self, on_next: impl FnMut(T) + 'static) -> Disposable {
        self.subscribe(NextFn(on_next))
    }
}

impl EventSource<i32> {
    /// Emits `count` consecutive integers starting at `start`, then completes.
    ///
    /// A negative `count`, or one that would run past `i32::MAX`, fails the
    /// subscription with [`RxError::InvalidArgument`].
    pub fn range(start: i32, count: i32) -> Self {
        if count < 0 {
            return Self::error(move || {
                RxError::invalid_argument("count", format!("{count} is negative"))
            });
        }
        let end = i64::from(start) + i64::from(count);
        if end - 1 > i64::from(i32::MAX) {
            return Self::error(move || {
                RxError::invalid_argument("count", format!("{start} + ({count} - 1) overflows i32"))
            });
        }
        Self::from_producer(move |emitter| {
            let mut value = i64::from(start);
            while value < end {
                if emitter.is_disposed() {
                    return;
                }
                // Bounded by the overflow check above
                emitter.next(value as i32);
                value += 1;
            }
            emitter.complete();
        })
    }
}
