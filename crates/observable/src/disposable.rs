use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// Cancellation handle returned by every `subscribe`.
///
/// Clones share the same handle: disposing any clone disposes them all, and
/// the cancellation callback runs at most once.
#[derive(Clone)]
pub struct Disposable(Rc<Inner>);

struct Inner {
    disposed: Cell<bool>,
    action: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Disposable {
    pub fn new(action: impl FnOnce() + 'static) -> Self {
        Self::with_action(Some(Box::new(action)))
    }

    /// A handle with nothing to cancel.
    pub fn empty() -> Self {
        Self::with_action(None)
    }

    fn with_action(action: Option<Box<dyn FnOnce()>>) -> Self {
        Disposable(Rc::new(Inner {
            disposed: Cell::new(false),
            action: RefCell::new(action),
        }))
    }

    pub fn dispose(&self) {
        if self.0.disposed.replace(true) {
            return;
        }
        // Release the borrow before running the action; it may reach back into this handle
        let action = self.0.action.borrow_mut().take();
        if let Some(f) = action {
            f();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.0.disposed.get()
    }

    pub(crate) fn same_handle(&self, other: &Disposable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use std::{cell::Cell, rc::Rc};

    use crate::Disposable;

    #[test]
    fn dispose_is_idempotent() {
        let counter = Rc::new(Cell::new(0));
        let d = {
            let counter = counter.clone();
            Disposable::new(move || counter.set(counter.get() + 1))
        };

        assert!(!d.is_disposed());
        d.dispose();
        d.dispose();
        assert!(d.is_disposed());
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn clones_share_state() {
        let counter = Rc::new(Cell::new(0));
        let d = {
            let counter = counter.clone();
            Disposable::new(move || counter.set(counter.get() + 1))
        };
        let other = d.clone();

        other.dispose();
        assert!(d.is_disposed());
        d.dispose();
        assert_eq!(counter.get(), 1);
        assert!(d.same_handle(&other));
        assert!(!d.same_handle(&Disposable::empty()));
    }

    #[test]
    fn action_may_dispose_itself() {
        let slot: Rc<Cell<Option<Disposable>>> = Rc::new(Cell::new(None));
        let d = {
            let slot = slot.clone();
            Disposable::new(move || {
                if let Some(me) = slot.take() {
                    me.dispose();
                }
            })
        };
        slot.set(Some(d.clone()));

        d.dispose();
        assert!(d.is_disposed());
    }
}
