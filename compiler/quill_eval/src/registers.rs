//! Register bag: tag-private state that outlives one render pass.
//!
//! Registers are keyed by string and hold typed cells. The bag is a shared
//! handle: cloning a `Registers` aliases the same slots, which is how spawned
//! contexts and explicitly shared renders see one another's state.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

type Slot = Rc<dyn Any>;

/// Shared, typed register storage.
#[derive(Clone, Default)]
pub struct Registers {
    slots: Rc<RefCell<FxHashMap<String, Slot>>>,
}

/// Saved register slots, in the order they were requested.
///
/// A `None` entry records that the slot did not exist at save time; restoring
/// it removes whatever was written since.
#[derive(Clone)]
pub struct RegisterSnapshot(Vec<(String, Option<Slot>)>);

impl RegisterSnapshot {
    /// Names of the saved slots, in save order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }
}

impl fmt::Debug for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// The register `key`, created with `T::default()` on first access.
    ///
    /// Repeat calls return the same cell. A slot holding another type is
    /// replaced by a fresh default.
    pub fn get<T: Default + 'static>(&self, key: &str) -> Rc<RefCell<T>> {
        let mut slots = self.slots.borrow_mut();
        if let Some(slot) = slots.get(key) {
            if let Ok(cell) = Rc::clone(slot).downcast::<RefCell<T>>() {
                return cell;
            }
            tracing::debug!(key, "register holds another type, reinitializing");
        }
        let cell = Rc::new(RefCell::new(T::default()));
        slots.insert(key.to_owned(), Rc::clone(&cell) as Slot);
        cell
    }

    /// Replace the register `key` with `value`.
    pub fn set<T: 'static>(&self, key: &str, value: T) -> Rc<RefCell<T>> {
        let cell = Rc::new(RefCell::new(value));
        self.slots
            .borrow_mut()
            .insert(key.to_owned(), Rc::clone(&cell) as Slot);
        cell
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }

    /// Snapshot the named slots.
    ///
    /// The snapshot holds the slot cells themselves; writes made through a
    /// cell obtained before the save remain visible after restore. Callers
    /// that need a pristine value swap the slot with `set`.
    pub fn save(&self, keys: &[&str]) -> RegisterSnapshot {
        let slots = self.slots.borrow();
        RegisterSnapshot(
            keys.iter()
                .map(|key| ((*key).to_owned(), slots.get(*key).cloned()))
                .collect(),
        )
    }

    /// Put saved slots back, in save order.
    pub fn restore(&self, snapshot: RegisterSnapshot) {
        let mut slots = self.slots.borrow_mut();
        for (key, slot) in snapshot.0 {
            match slot {
                Some(slot) => {
                    slots.insert(key, slot);
                }
                None => {
                    slots.remove(&key);
                }
            }
        }
    }

    /// Whether two handles alias the same bag.
    pub fn ptr_eq(&self, other: &Registers) -> bool {
        Rc::ptr_eq(&self.slots, &other.slots)
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        let mut keys: Vec<_> = slots.keys().collect();
        keys.sort();
        f.debug_set().entries(keys).finish()
    }
}

#[cfg(test)]
mod tests;
