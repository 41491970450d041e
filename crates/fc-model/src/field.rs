//! Driver mode and editable field values.

use serde::{Deserialize, Serialize};

/// Which of the two mutually dependent fields currently drives computation.
///
/// Exactly one field is the driver at any time. The other field is derived
/// from it and is only ever written by the engine.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Mode {
    /// The supplied fuel quantity drives; compliance units are derived.
    #[default]
    Quantity,
    /// The compliance units drive; the fuel quantity is derived.
    Units,
}

impl Mode {
    /// The derived (non-driver) counterpart of this mode.
    pub fn other(self) -> Self {
        match self {
            Self::Quantity => Self::Units,
            Self::Units => Self::Quantity,
        }
    }
}

/// A numeric-or-empty calculator field.
///
/// `None` corresponds to an empty display. Values are written either by a
/// user edit or by the engine publishing a computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValue(Option<f64>);

impl FieldValue {
    /// An empty field.
    pub fn empty() -> Self {
        Self(None)
    }

    /// Get the numeric value, if any.
    pub fn get(&self) -> Option<f64> {
        self.0
    }

    /// True if the field holds no value.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Overwrite the field.
    pub fn set(&mut self, value: Option<f64>) {
        self.0 = value;
    }

    /// Clear the field.
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self(Some(value))
    }
}
