// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HSV color type for colour-mode control.

use std::fmt;

use crate::error::ValueError;

/// HSV (HSB) color for colour mode.
///
/// - Hue: 0-360 degrees
/// - Saturation: 0-100 percent
/// - Value (brightness): 0-100 percent
///
/// The vendor stores saturation and value ×10; the wire layer applies that
/// scaling on transmission, this type stays in domain units.
///
/// # Examples
///
/// ```
/// use cloudlamp::types::HsvColor;
///
/// let color = HsvColor::new(180, 50, 80).unwrap();
/// assert_eq!(color.hue(), 180);
/// assert_eq!(color.saturation(), 50);
/// assert_eq!(color.value(), 80);
///
/// // Out-of-range components are rejected
/// assert!(HsvColor::new(361, 50, 80).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HsvColor {
    hue: u16,
    saturation: u16,
    value: u16,
}

impl HsvColor {
    /// Creates a new HSV color.
    ///
    /// # Arguments
    ///
    /// * `hue` - Hue in degrees (0-360)
    /// * `saturation` - Saturation percentage (0-100)
    /// * `value` - Brightness percentage (0-100)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for the first component outside its
    /// range.
    pub fn new(hue: u16, saturation: u16, value: u16) -> Result<Self, ValueError> {
        if hue > 360 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 360,
                actual: hue,
            });
        }
        if saturation > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: saturation,
            });
        }
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: value,
            });
        }
        Ok(Self {
            hue,
            saturation,
            value,
        })
    }

    /// Creates an HSV color, clamping each component to its valid range.
    #[must_use]
    pub fn clamped(hue: u16, saturation: u16, value: u16) -> Self {
        Self {
            hue: hue.min(360),
            saturation: saturation.min(100),
            value: value.min(100),
        }
    }

    /// Returns the hue in degrees (0-360).
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Returns the saturation percentage (0-100).
    #[must_use]
    pub const fn saturation(&self) -> u16 {
        self.saturation
    }

    /// Returns the value (brightness) percentage (0-100).
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }
}

impl fmt::Display for HsvColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.hue, self.saturation, self.value)
    }
}
