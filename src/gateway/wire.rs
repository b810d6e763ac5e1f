// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire shapes for the vendor gateway and the normalization table.
//!
//! Writes are lists of desired-state entries (`{key, type, value}` tuples);
//! reads come back as a flat list of reported-state entries. Normalization
//! from vendor keys and vendor integer precision (×10 for percentages, ×60
//! for the sleep timer) into the domain field set is driven by a declarative
//! key table so it stays testable without the HTTP transport.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Brightness, HsvColor, Scene, SleepTimer, WhiteTemperature, WorkMode};

// ============================================================================
// Desired state (writes)
// ============================================================================

/// An HSV triple in vendor integer precision (saturation and value are ×10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourValue {
    /// Hue in degrees (0-360), unscaled.
    pub h: u16,
    /// Saturation in tenths of a percent (0-1000).
    pub s: u16,
    /// Value in tenths of a percent (0-1000).
    pub v: u16,
}

/// A single `{key, type, value}` desired-state entry.
///
/// The entry shape varies per value kind; absent fields are omitted from the
/// serialized body. The colour entry carries no `type` field but duplicates
/// the triple as a JSON string in `string_value`, matching what the vendor
/// app sends.
#[derive(Debug, Clone, Serialize)]
pub struct DesiredState {
    key: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    value_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enum_value: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    integer_value: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bool_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    colour_value: Option<ColourValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,
}

impl DesiredState {
    fn enumeration(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value_type: Some("ENUM"),
            enum_value: Some(value),
            integer_value: None,
            bool_value: None,
            colour_value: None,
            string_value: None,
        }
    }

    fn integer(key: &'static str, value: u32) -> Self {
        Self {
            key,
            value_type: Some("INTEGER"),
            enum_value: None,
            integer_value: Some(value),
            bool_value: None,
            colour_value: None,
            string_value: None,
        }
    }

    fn boolean(key: &'static str, value: bool) -> Self {
        Self {
            key,
            value_type: Some("BOOL"),
            enum_value: None,
            integer_value: None,
            bool_value: Some(value),
            colour_value: None,
            string_value: None,
        }
    }

    fn colour(color: HsvColor) -> Self {
        let value = ColourValue {
            h: color.hue(),
            s: color.saturation() * 10,
            v: color.value() * 10,
        };
        Self {
            key: "light_colour",
            value_type: None,
            enum_value: None,
            integer_value: None,
            bool_value: None,
            colour_value: Some(value),
            string_value: Some(format!(
                "{{\"h\":{},\"s\":{},\"v\":{}}}",
                value.h, value.s, value.v
            )),
        }
    }
}

/// A write operation against the lamp, expanded to desired-state entries.
///
/// Mode-selecting writes (white, colour, scene) carry the `light_mode` entry
/// alongside their parameters so the lamp switches modes atomically with the
/// new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LampCommand {
    /// Power the lamp on or off.
    OnOff(bool),
    /// Switch to white mode with the given brightness and temperature.
    White(Brightness, WhiteTemperature),
    /// Switch to colour mode with the given HSV color.
    Colour(HsvColor),
    /// Activate a vendor scene preset.
    Scene(Scene),
    /// Arm the sleep timer.
    Timer(SleepTimer),
}

impl LampCommand {
    /// Expands the command into its desired-state entries.
    ///
    /// Percentage parameters are re-scaled ×10 and the timer ×60 to match
    /// vendor integer precision.
    #[must_use]
    pub fn entries(&self) -> Vec<DesiredState> {
        match self {
            Self::OnOff(value) => vec![DesiredState::boolean("on_off", *value)],
            Self::White(brightness, temperature) => vec![
                DesiredState::enumeration("light_mode", WorkMode::White.as_str()),
                DesiredState::integer("light_brightness", u32::from(brightness.value()) * 10),
                DesiredState::integer("light_colour_temp", u32::from(temperature.value()) * 10),
            ],
            Self::Colour(color) => vec![
                DesiredState::enumeration("light_mode", WorkMode::Colour.as_str()),
                DesiredState::colour(*color),
            ],
            Self::Scene(scene) => vec![
                DesiredState::enumeration("light_mode", WorkMode::Scene.as_str()),
                DesiredState::enumeration("light_scene", scene.as_str()),
            ],
            Self::Timer(timer) => vec![DesiredState::integer("sleep_timer", timer.as_seconds())],
        }
    }
}

// ============================================================================
// Reported state (reads)
// ============================================================================

/// Response body of a device-state read.
#[derive(Debug, Deserialize)]
pub(crate) struct DeviceStateResponse {
    pub reported_state: Vec<ReportedEntry>,
}

/// One reported `{key, value}` tuple from the gateway.
#[derive(Debug, Deserialize)]
pub struct ReportedEntry {
    /// Vendor field key.
    pub key: String,
    /// Boolean payload, when the key carries one.
    #[serde(default)]
    pub bool_value: Option<bool>,
    /// Enum payload, when the key carries one.
    #[serde(default)]
    pub enum_value: Option<String>,
    /// Integer payload; the gateway serializes these as numbers or strings.
    #[serde(default, deserialize_with = "integer_or_string")]
    pub integer_value: Option<i64>,
    /// Colour payload of `colour_data_v2`.
    #[serde(default)]
    pub color_value: Option<ColourValue>,
}

fn integer_or_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Integer(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Integer(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Normalized lamp state from a single gateway read.
///
/// Every field is optional because the gateway only reports keys the device
/// currently exposes; `online` in particular is absent outside the richer
/// vendor integration, which implies an always-reachable device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Reachability of the physical device.
    pub online: Option<bool>,
    /// Power state.
    pub on_off: Option<bool>,
    /// Active display mode.
    pub work_mode: Option<WorkMode>,
    /// Active scene preset.
    pub scene: Option<Scene>,
    /// White-mode brightness (1-100).
    pub brightness: Option<u16>,
    /// White-mode temperature (0-100).
    pub temperature: Option<u16>,
    /// Colour-mode hue (0-360).
    pub hue: Option<u16>,
    /// Colour-mode saturation (0-100).
    pub saturation: Option<u16>,
    /// Colour-mode value (0-100).
    pub value: Option<u16>,
    /// Sleep timer countdown in minutes (0-1440).
    pub timer_minutes: Option<u16>,
}

/// Which snapshot slot a vendor integer key lands in.
#[derive(Debug, Clone, Copy)]
enum IntegerField {
    Brightness,
    Temperature,
    Timer,
}

/// Unit conversion from vendor integer precision to domain units.
#[derive(Debug, Clone, Copy)]
enum Unit {
    /// ×10 stored value, floor-divided back.
    Tenths,
    /// Like [`Unit::Tenths`], but a converted 0 becomes 1. The gateway
    /// reports `bright_value_v2` below 10 for the dimmest setting, which
    /// would floor to an illegal brightness of 0.
    TenthsFloorOne,
    /// Seconds on the wire, minutes in the domain.
    SecondsToMinutes,
}

/// Vendor integer key table: `{vendor_key → (domain_field, unit)}`.
const INTEGER_KEYS: [(&str, IntegerField, Unit); 3] = [
    ("bright_value_v2", IntegerField::Brightness, Unit::TenthsFloorOne),
    ("temp_value_v2", IntegerField::Temperature, Unit::Tenths),
    ("sleep_timer", IntegerField::Timer, Unit::SecondsToMinutes),
];

fn convert(value: i64, unit: Unit) -> u16 {
    let converted = match unit {
        Unit::Tenths => value / 10,
        Unit::TenthsFloorOne => match value / 10 {
            0 => 1,
            v => v,
        },
        Unit::SecondsToMinutes => value / 60,
    };
    u16::try_from(converted.max(0)).unwrap_or(u16::MAX)
}

impl StateSnapshot {
    /// Normalizes a reported-state list into the domain field set.
    ///
    /// Unknown keys and unparseable enum values are skipped rather than
    /// failing the whole read.
    #[must_use]
    pub fn from_reported(entries: &[ReportedEntry]) -> Self {
        let mut snapshot = Self::default();
        for entry in entries {
            match entry.key.as_str() {
                "online" => snapshot.online = entry.bool_value,
                "on_off" => snapshot.on_off = entry.bool_value,
                "work_mode" => {
                    snapshot.work_mode = entry.enum_value.as_deref().and_then(|s| s.parse().ok());
                }
                "light_scene" => {
                    snapshot.scene = entry.enum_value.as_deref().and_then(|s| s.parse().ok());
                }
                "colour_data_v2" => {
                    if let Some(colour) = entry.color_value {
                        snapshot.hue = Some(colour.h);
                        snapshot.saturation = Some(colour.s / 10);
                        snapshot.value = Some(colour.v / 10);
                    }
                }
                key => {
                    if let Some((_, field, unit)) =
                        INTEGER_KEYS.iter().find(|(name, _, _)| *name == key)
                        && let Some(raw) = entry.integer_value
                    {
                        let converted = convert(raw, *unit);
                        match field {
                            IntegerField::Brightness => snapshot.brightness = Some(converted),
                            IntegerField::Temperature => snapshot.temperature = Some(converted),
                            IntegerField::Timer => snapshot.timer_minutes = Some(converted),
                        }
                    }
                }
            }
        }
        snapshot
    }
}
