// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! White-mode brightness and color temperature types.
//!
//! The vendor stores both as integers scaled ×10 relative to the 0-100
//! domain scale; the wire layer applies that scaling, these types stay in
//! domain units.

use std::fmt;

use crate::error::ValueError;

/// White-mode brightness as a percentage (1-100).
///
/// The gateway rejects a brightness of 0; the lamp is switched off through
/// the power state instead, so 1 is the floor.
///
/// # Examples
///
/// ```
/// use cloudlamp::types::Brightness;
///
/// let b = Brightness::new(75).unwrap();
/// assert_eq!(b.value(), 75);
///
/// assert_eq!(Brightness::MIN.value(), 1);
/// assert_eq!(Brightness::MAX.value(), 100);
///
/// assert!(Brightness::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u16);

impl Brightness {
    /// Minimum brightness (1%).
    pub const MIN: Self = Self(1);

    /// Maximum brightness (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1, 100].
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if !(1..=100).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: 100,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Creates a brightness value, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u16) -> Self {
        if value < 1 {
            Self(1)
        } else if value > 100 {
            Self(100)
        } else {
            Self(value)
        }
    }

    /// Returns the brightness percentage value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u16> for Brightness {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// White color temperature as a percentage (0-100).
///
/// 0 is the warmest setting, 100 the coolest. Unlike [`Brightness`], 0 is a
/// legal value here.
///
/// # Examples
///
/// ```
/// use cloudlamp::types::WhiteTemperature;
///
/// let t = WhiteTemperature::new(30).unwrap();
/// assert_eq!(t.value(), 30);
///
/// assert!(WhiteTemperature::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WhiteTemperature(u16);

impl WhiteTemperature {
    /// Warmest setting (0%).
    pub const WARM: Self = Self(0);

    /// Coolest setting (100%).
    pub const COOL: Self = Self(100);

    /// Creates a new white temperature value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Creates a white temperature, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u16) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the temperature percentage value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for WhiteTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u16> for WhiteTemperature {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
