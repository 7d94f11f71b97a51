//! Observable state: a value plus watchers notified on every change.
//!
//! Views subscribe with [`Observable::watch`] and re-render from the stream.

use futures::channel::mpsc;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct Observable<T: Clone> {
    value: Rc<RefCell<T>>,
    watchers: Rc<RefCell<Vec<mpsc::UnboundedSender<T>>>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(initial)),
            watchers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Replace the value and notify watchers
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value.clone();
        self.notify(value);
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let value = {
            let mut current = self.value.borrow_mut();
            f(&mut current);
            current.clone()
        };
        self.notify(value);
    }

    /// Stream of future values (the current value is not replayed)
    pub fn watch(&self) -> mpsc::UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded();
        self.watchers.borrow_mut().push(tx);
        rx
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.borrow().len()
    }

    fn notify(&self, value: T) {
        let mut watchers = self.watchers.borrow_mut();
        watchers.retain(|tx| tx.unbounded_send(value.clone()).is_ok());
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Set only when different; returns whether watchers were notified
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Selected wallet id, owned by one kit instance
#[derive(Clone, Default)]
pub struct KitState {
    selected: Observable<Option<String>>,
}

impl KitState {
    pub fn new(initial: Option<String>) -> Self {
        Self { selected: Observable::new(initial) }
    }

    pub fn selected(&self) -> Option<String> {
        self.selected.get()
    }

    pub fn select(&self, id: impl Into<String>) {
        self.selected.set_if_changed(Some(id.into()));
    }

    pub fn clear(&self) {
        self.selected.set_if_changed(None);
    }

    pub fn watch(&self) -> mpsc::UnboundedReceiver<Option<String>> {
        self.selected.watch()
    }
}
