use crate::Disposable;

/// Runs its cleanup when dropped. Turns a [`Disposable`] into a scope guard.
pub struct CleanUp(Option<Box<dyn FnOnce()>>);

impl CleanUp {
    /// Drops the guard without running the cleanup.
    pub fn forget(mut self) {
        self.0 = None;
    }
}

impl Drop for CleanUp {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

impl From<Box<dyn FnOnce()>> for CleanUp {
    fn from(value: Box<dyn FnOnce()>) -> Self {
        CleanUp(Some(value))
    }
}

impl From<Disposable> for CleanUp {
    fn from(value: Disposable) -> Self {
        CleanUp(Some(Box::new(move || value.dispose())))
    }
}

#[cfg(test)]
mod test {
    use std::{cell::Cell, rc::Rc};

    use crate::{CleanUp, Disposable, EventSource};

    #[test]
    fn clean_up() {
        let counter = Rc::new(Cell::new(0));
        let f = {
            let counter = counter.clone();
            move || {
                let val = counter.get() + 1;
                counter.set(val);
                drop(counter);
            }
        };
        let f: Box<dyn FnOnce()> = Box::new(f);
        let clean_up = CleanUp::from(f);

        assert_eq!(counter.get(), 0);
        drop(clean_up);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn guard_disposes_subscription() {
        let disposed = Rc::new(Cell::new(false));
        let source = {
            let disposed = disposed.clone();
            EventSource::<()>::never().do_on_dispose(move || disposed.set(true))
        };

        {
            let _guard = CleanUp::from(source.subscribe_next(|_| {}));
            assert!(!disposed.get());
        }
        assert!(disposed.get());
    }

    #[test]
    fn forget_skips_cleanup() {
        let d = Disposable::empty();
        CleanUp::from(d.clone()).forget();
        assert!(!d.is_disposed());
    }
}
