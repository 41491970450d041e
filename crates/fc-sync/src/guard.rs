//! One-shot markers for engine-originated field writes.

use fc_model::Mode;

/// Boolean pair marking fields the engine has just written.
///
/// A token is set immediately before the engine writes a derived field and
/// survives until the next edit event on that field consumes it, or until
/// the next tick clears it. While set, an edit event on the field is
/// engine-originated: it must not flip the driver mode or arm the debounce
/// window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncGuard {
    quantity: bool,
    units: bool,
}

impl SyncGuard {
    fn flag_mut(&mut self, field: Mode) -> &mut bool {
        match field {
            Mode::Quantity => &mut self.quantity,
            Mode::Units => &mut self.units,
        }
    }

    /// Set the token for a field.
    pub fn set(&mut self, field: Mode) {
        *self.flag_mut(field) = true;
    }

    /// Consume the token for a field, returning whether it was set.
    pub fn take(&mut self, field: Mode) -> bool {
        std::mem::take(self.flag_mut(field))
    }

    /// Peek at a field's token without consuming it.
    pub fn is_set(&self, field: Mode) -> bool {
        match field {
            Mode::Quantity => self.quantity,
            Mode::Units => self.units,
        }
    }

    /// Drop both tokens.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_is_one_shot() {
        let mut guard = SyncGuard::default();
        guard.set(Mode::Units);

        assert!(guard.is_set(Mode::Units));
        assert!(guard.take(Mode::Units));
        assert!(!guard.take(Mode::Units));
    }

    #[test]
    fn fields_are_independent() {
        let mut guard = SyncGuard::default();
        guard.set(Mode::Quantity);

        assert!(!guard.take(Mode::Units));
        assert!(guard.take(Mode::Quantity));
    }

    #[test]
    fn clear_drops_both() {
        let mut guard = SyncGuard::default();
        guard.set(Mode::Quantity);
        guard.set(Mode::Units);
        guard.clear();

        assert_eq!(guard, SyncGuard::default());
    }
}
