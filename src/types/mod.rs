// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for lamp control.
//!
//! This module provides type-safe representations of values accepted by the
//! vendor gateway. Each type ensures values are within their valid ranges at
//! construction time, preventing out-of-bounds writes to the device.
//!
//! # Types
//!
//! - [`Brightness`] - White-mode brightness (1-100)
//! - [`WhiteTemperature`] - White color temperature (0-100)
//! - [`HsvColor`] - HSV color (Hue 0-360, Saturation 0-100, Value 0-100)
//! - [`SleepTimer`] - Countdown length in minutes (0-1440)
//! - [`Scene`] - Vendor-defined lighting preset
//! - [`WorkMode`] - Mutually exclusive display mode (white/colour/scene)

mod brightness;
mod color;
mod scene;
mod timer;

pub use brightness::{Brightness, WhiteTemperature};
pub use color::HsvColor;
pub use scene::{Scene, WorkMode};
pub use timer::SleepTimer;
