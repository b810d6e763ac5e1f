// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sleep timer countdown length.

use std::fmt;

use crate::error::ValueError;

/// Sleep timer countdown length in minutes (0-1440).
///
/// The gateway accepts 0 on writes (cancelling the countdown); the local
/// state mirror floors its field to 1, see `state::LampState`.
///
/// # Examples
///
/// ```
/// use cloudlamp::types::SleepTimer;
///
/// let timer = SleepTimer::new(120).unwrap();
/// assert_eq!(timer.minutes(), 120);
/// assert_eq!(timer.as_seconds(), 7200);
///
/// assert!(SleepTimer::new(1441).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SleepTimer(u16);

impl SleepTimer {
    /// Maximum countdown (24 hours).
    pub const MAX: Self = Self(1440);

    /// Creates a new sleep timer length.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if minutes exceeds 1440.
    pub fn new(minutes: u16) -> Result<Self, ValueError> {
        if minutes > 1440 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 1440,
                actual: minutes,
            });
        }
        Ok(Self(minutes))
    }

    /// Creates a sleep timer, clamping to the valid range.
    #[must_use]
    pub const fn clamped(minutes: u16) -> Self {
        if minutes > 1440 { Self(1440) } else { Self(minutes) }
    }

    /// Returns the countdown length in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.0
    }

    /// Returns the countdown length in seconds, as transmitted to the vendor.
    #[must_use]
    pub const fn as_seconds(&self) -> u32 {
        self.0 as u32 * 60
    }
}

impl fmt::Display for SleepTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

impl TryFrom<u16> for SleepTimer {
    type Error = ValueError;

    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}
