use std::{
    cell::{Cell, RefCell},
    mem,
};

use crate::Disposable;

/// An owned set of [`Disposable`]s cancelled together.
///
/// Once the group itself is disposed, anything added to it is disposed on the spot.
#[derive(Default)]
pub struct DisposableGroup {
    disposed: Cell<bool>,
    items: RefCell<Vec<Disposable>>,
}

impl DisposableGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `d`. Returns `false` and disposes `d` if the group is already disposed.
    pub fn add(&self, d: Disposable) -> bool {
        if self.disposed.get() {
            d.dispose();
            return false;
        }
        self.items.borrow_mut().push(d);
        true
    }

    pub fn add_all(&self, items: impl IntoIterator<Item = Disposable>) -> bool {
        if self.disposed.get() {
            items.into_iter().for_each(|d| d.dispose());
            return false;
        }
        self.items.borrow_mut().extend(items);
        true
    }

    /// Removes `d` from the group and disposes it.
    pub fn remove(&self, d: &Disposable) -> bool {
        if self.delete(d) {
            d.dispose();
            true
        } else {
            false
        }
    }

    /// Removes `d` from the group without disposing it.
    pub fn delete(&self, d: &Disposable) -> bool {
        let mut items = self.items.borrow_mut();
        match items.iter().position(|item| item.same_handle(d)) {
            Some(offset) => {
                items.remove(offset);
                true
            }
            None => false,
        }
    }

    /// Disposes all members but leaves the group open for new ones.
    pub fn clear(&self) {
        if self.disposed.get() {
            return;
        }
        self.dispose_members();
    }

    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        log::trace!("disposing group of {} members", self.len());
        self.dispose_members();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn dispose_members(&self) {
        // Members may add to or dispose this group while being disposed,
        // so take the vec out before calling them
        let working_set = mem::take(&mut *self.items.borrow_mut());
        for d in working_set {
            d.dispose();
        }
    }
}
