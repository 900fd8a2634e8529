//! Edge-triggered alert latch.
//!
//! A latch is `Inactive` until its condition first holds. That rising edge
//! is the only transition that reports an alert; the latch then stays
//! `Active` until the condition is observed false, which clears it silently.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Latch {
    #[default]
    Inactive,
    Active,
}

impl Latch {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    /// Record that the alert condition holds.
    ///
    /// Returns `true` only on the `Inactive -> Active` transition.
    pub fn arm(&mut self) -> bool {
        match self {
            Self::Inactive => {
                *self = Self::Active;
                true
            }
            Self::Active => false,
        }
    }

    /// Record that the alert condition no longer holds.
    pub fn release(&mut self) {
        *self = Self::Inactive;
    }
}
