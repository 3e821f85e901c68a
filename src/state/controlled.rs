//! Controlled or uncontrolled value slot.
//!
//! A value handed in at construction is controlled: the owner keeps the
//! source of truth and pushes updates through [`Controlled::sync`]. Without
//! one the slot manages its own value. Either way the current value is
//! readable at all times, so the state machine never goes stale while it
//! waits for the owner.

#[derive(Debug, Clone)]
pub(crate) struct Controlled<T> {
    value: T,
    controlled: bool,
}

impl<T: PartialEq> Controlled<T> {
    pub(crate) fn new(controlled_value: Option<T>, default: T) -> Self {
        match controlled_value {
            Some(value) => Self {
                value,
                controlled: true,
            },
            None => Self {
                value: default,
                controlled: false,
            },
        }
    }

    pub(crate) fn get(&self) -> &T {
        &self.value
    }

    /// Internal update. Returns whether the value changed under `T`'s
    /// equality. The new value is stored either way: equality may be
    /// coarser than the representation (calendar dates compare on the
    /// canonical day), and the latest representation must win.
    pub(crate) fn set(&mut self, value: T) -> bool {
        let changed = self.value != value;
        self.value = value;
        changed
    }

    /// Owner update for a controlled slot. Ignored on an uncontrolled slot,
    /// which owns its value.
    pub(crate) fn sync(&mut self, value: T) {
        if !self.controlled {
            log::warn!("sync called on an uncontrolled value; ignoring");
            return;
        }
        self.value = value;
    }

    #[cfg(test)]
    pub(crate) fn is_controlled(&self) -> bool {
        self.controlled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncontrolled_starts_from_default() {
        let slot = Controlled::new(None, 5);
        assert_eq!(*slot.get(), 5);
        assert!(!slot.is_controlled());
    }

    #[test]
    fn test_controlled_starts_from_owner_value() {
        let slot = Controlled::new(Some(7), 5);
        assert_eq!(*slot.get(), 7);
        assert!(slot.is_controlled());
    }

    #[test]
    fn test_set_reports_change() {
        let mut slot = Controlled::new(None, 1);
        assert!(slot.set(2));
        assert!(!slot.set(2));
        assert_eq!(*slot.get(), 2);
    }

    // Equality on one field only, like dates comparing on the canonical
    // day while carrying per-calendar fields.
    #[derive(Debug, Clone, Copy)]
    struct Labeled {
        key: i32,
        label: char,
    }

    impl PartialEq for Labeled {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    #[test]
    fn test_set_stores_equal_value_with_new_representation() {
        let mut slot = Controlled::new(None, Labeled { key: 1, label: 'a' });
        let changed = slot.set(Labeled { key: 1, label: 'b' });
        assert!(!changed);
        assert_eq!(slot.get().label, 'b');
    }

    #[test]
    fn test_sync_replaces_value() {
        let mut slot = Controlled::new(Some(1), 0);
        slot.sync(9);
        assert_eq!(*slot.get(), 9);
    }

    #[test]
    fn test_sync_ignored_when_uncontrolled() {
        let mut slot = Controlled::new(None, 1);
        slot.sync(9);
        assert_eq!(*slot.get(), 1);
    }
}
