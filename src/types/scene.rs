// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene presets and work modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A vendor-defined lighting preset.
///
/// Scenes are mutually exclusive with manual white/colour control; selecting
/// one switches the lamp to [`WorkMode::Scene`].
///
/// # Examples
///
/// ```
/// use cloudlamp::types::Scene;
///
/// let scene: Scene = "sunset".parse().unwrap();
/// assert_eq!(scene, Scene::Sunset);
/// assert_eq!(scene.as_str(), "sunset");
///
/// assert!("disco".parse::<Scene>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// Flickering candle light.
    Candle,
    /// Northern lights.
    Arctic,
    /// Romantic.
    Romantic,
    /// Dawn.
    Dawn,
    /// Sunset.
    Sunset,
    /// Christmas.
    Christmas,
    /// Plant-growth light.
    Fito,
}

impl Scene {
    /// All scenes the vendor defines, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Candle,
        Self::Arctic,
        Self::Romantic,
        Self::Dawn,
        Self::Sunset,
        Self::Christmas,
        Self::Fito,
    ];

    /// Returns the vendor wire name of the scene.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candle => "candle",
            Self::Arctic => "arctic",
            Self::Romantic => "romantic",
            Self::Dawn => "dawn",
            Self::Sunset => "sunset",
            Self::Christmas => "christmas",
            Self::Fito => "fito",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scene {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scene| scene.as_str() == s)
            .ok_or_else(|| ValueError::UnknownScene(s.to_string()))
    }
}

/// Mutually exclusive display mode of the lamp.
///
/// The gateway reports this as `work_mode`; writes select it through the
/// `light_mode` desired-state entry alongside the mode's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    /// Manual white control (brightness + temperature).
    White,
    /// Manual HSV colour control.
    Colour,
    /// A vendor scene preset is active.
    Scene,
}

impl WorkMode {
    /// Returns the vendor wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Colour => "colour",
            Self::Scene => "scene",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Self::White),
            "colour" => Ok(Self::Colour),
            "scene" => Ok(Self::Scene),
            other => Err(ValueError::UnknownWorkMode(other.to_string())),
        }
    }
}
