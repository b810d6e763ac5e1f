// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clamped, steppable mirror of the lamp parameters.

use chrono::{DateTime, TimeZone};

use crate::gateway::StateSnapshot;
use crate::types::{Scene, WorkMode};

/// The fixed sequence of increment magnitudes a user can cycle through.
pub const STEP_LADDER: [u16; 5] = [1, 5, 10, 50, 100];

/// Ladder index restored by `reset(Field::Step)`.
const DEFAULT_STEP_INDEX: usize = 2;

/// A steppable numeric field of [`LampState`].
///
/// The field-to-bounds and field-to-default tables hang off this enum and
/// are the authoritative source of truth for clamping and reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// White-mode brightness.
    Brightness,
    /// White-mode color temperature.
    Temperature,
    /// Colour-mode hue.
    Hue,
    /// Colour-mode saturation.
    Saturation,
    /// Colour-mode value.
    Value,
    /// Sleep timer minutes.
    Timer,
    /// The step control itself; adjusted along [`STEP_LADDER`].
    Step,
}

impl Field {
    /// Closed interval the field is clamped to after every mutation.
    #[must_use]
    pub const fn bounds(self) -> (u16, u16) {
        match self {
            Self::Brightness => (1, 100),
            Self::Temperature | Self::Saturation | Self::Value => (0, 100),
            Self::Hue => (0, 360),
            Self::Timer => (1, 1440),
            Self::Step => (STEP_LADDER[0], STEP_LADDER[STEP_LADDER.len() - 1]),
        }
    }

    /// Fixed default restored by [`LampState::reset`].
    #[must_use]
    pub const fn default_value(self) -> u16 {
        match self {
            Self::Brightness | Self::Temperature | Self::Saturation | Self::Value => 50,
            Self::Hue => 180,
            Self::Timer => 480,
            Self::Step => STEP_LADDER[DEFAULT_STEP_INDEX],
        }
    }
}

/// A partial update folded into [`LampState`] after a successful remote
/// write, without a full re-read.
///
/// `scheduled_time` is doubly optional so an update can also clear it.
/// The step control is deliberately absent: it is UI-only state that never
/// comes back from a remote write, and leaving it out keeps `step` and
/// `step_index` impossible to de-synchronize. It moves only through
/// [`LampState::increment`], [`LampState::decrement`] and
/// [`LampState::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    /// New power state.
    pub on_off: Option<bool>,
    /// New display mode.
    pub work_mode: Option<WorkMode>,
    /// New active scene.
    pub scene: Option<Scene>,
    /// New brightness.
    pub brightness: Option<u16>,
    /// New temperature.
    pub temperature: Option<u16>,
    /// New hue.
    pub hue: Option<u16>,
    /// New saturation.
    pub saturation: Option<u16>,
    /// New value.
    pub value: Option<u16>,
    /// New timer minutes.
    pub timer_minutes: Option<u16>,
    /// New scheduled fire time, or `Some(None)` to clear it.
    pub scheduled_time: Option<Option<String>>,
}

/// Last-known normalized state of the lamp plus UI-only controls.
///
/// One live instance per process, owned by the orchestration layer and
/// replaced whenever the client confirms a new read. Mutations are
/// synchronous and infallible: numbers saturate at their field bounds. The
/// struct imposes no internal locking; an embedding layer that shares it
/// across threads must serialize access itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LampState {
    online: bool,
    on_off: bool,
    work_mode: WorkMode,
    scene: Scene,
    brightness: u16,
    temperature: u16,
    hue: u16,
    saturation: u16,
    value: u16,
    timer_minutes: u16,
    scheduled_time: Option<String>,
    step: u16,
    step_index: usize,
}

impl Default for LampState {
    /// Presentation defaults with the finest step, for contexts without a
    /// remote read.
    fn default() -> Self {
        Self {
            online: true,
            on_off: false,
            work_mode: WorkMode::White,
            scene: Scene::Candle,
            brightness: Field::Brightness.default_value(),
            temperature: Field::Temperature.default_value(),
            hue: Field::Hue.default_value(),
            saturation: Field::Saturation.default_value(),
            value: Field::Value.default_value(),
            timer_minutes: Field::Timer.default_value(),
            scheduled_time: None,
            step: STEP_LADDER[0],
            step_index: 0,
        }
    }
}

impl LampState {
    /// Builds a state from a full remote read.
    ///
    /// Absent snapshot fields keep their presentation defaults. An absent
    /// `online` means the integration does not report reachability and the
    /// device counts as reachable. A reported timer of 0 is floored to 1 by
    /// the bounds table, so "unset" and "zero minutes" collapse into one.
    #[must_use]
    pub fn from_snapshot(snapshot: &StateSnapshot) -> Self {
        let mut state = Self {
            online: snapshot.online.unwrap_or(true),
            ..Self::default()
        };
        if let Some(on_off) = snapshot.on_off {
            state.on_off = on_off;
        }
        if let Some(mode) = snapshot.work_mode {
            state.work_mode = mode;
        }
        if let Some(scene) = snapshot.scene {
            state.scene = scene;
        }
        if let Some(v) = snapshot.brightness {
            state.set(Field::Brightness, v);
        }
        if let Some(v) = snapshot.temperature {
            state.set(Field::Temperature, v);
        }
        if let Some(v) = snapshot.hue {
            state.set(Field::Hue, v);
        }
        if let Some(v) = snapshot.saturation {
            state.set(Field::Saturation, v);
        }
        if let Some(v) = snapshot.value {
            state.set(Field::Value, v);
        }
        if let Some(v) = snapshot.timer_minutes {
            state.set(Field::Timer, v);
        }
        state
    }

    // ========== Accessors ==========

    /// Reachability of the physical device.
    #[must_use]
    pub fn online(&self) -> bool {
        self.online
    }

    /// Power state.
    #[must_use]
    pub fn on_off(&self) -> bool {
        self.on_off
    }

    /// Active display mode.
    #[must_use]
    pub fn work_mode(&self) -> WorkMode {
        self.work_mode
    }

    /// Active scene preset; meaningful when the mode is
    /// [`WorkMode::Scene`].
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// White-mode brightness (1-100).
    #[must_use]
    pub fn brightness(&self) -> u16 {
        self.brightness
    }

    /// White-mode temperature (0-100).
    #[must_use]
    pub fn temperature(&self) -> u16 {
        self.temperature
    }

    /// Colour-mode hue (0-360).
    #[must_use]
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Colour-mode saturation (0-100).
    #[must_use]
    pub fn saturation(&self) -> u16 {
        self.saturation
    }

    /// Colour-mode value (0-100).
    #[must_use]
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Sleep timer countdown in minutes (1-1440).
    #[must_use]
    pub fn timer_minutes(&self) -> u16 {
        self.timer_minutes
    }

    /// Clock time the armed timer will fire, if one is armed.
    #[must_use]
    pub fn scheduled_time(&self) -> Option<&str> {
        self.scheduled_time.as_deref()
    }

    /// Current increment magnitude.
    #[must_use]
    pub fn step(&self) -> u16 {
        self.step
    }

    /// Position of the current step on [`STEP_LADDER`].
    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    // ========== Mutations ==========

    /// Adds the current step to the field, saturating at its upper bound.
    ///
    /// For [`Field::Step`] the ladder index moves up by one instead, clamped
    /// to the last ladder entry.
    pub fn increment(&mut self, field: Field) {
        match field {
            Field::Step => self.shift_step(1),
            _ => self.adjust(field, i32::from(self.step)),
        }
    }

    /// Subtracts the current step from the field, saturating at its lower
    /// bound.
    pub fn decrement(&mut self, field: Field) {
        match field {
            Field::Step => self.shift_step(-1),
            _ => self.adjust(field, -i32::from(self.step)),
        }
    }

    /// Restores the field to its fixed default.
    pub fn reset(&mut self, field: Field) {
        match field {
            Field::Step => {
                self.step_index = DEFAULT_STEP_INDEX;
                self.step = STEP_LADDER[DEFAULT_STEP_INDEX];
            }
            _ => self.set(field, field.default_value()),
        }
    }

    /// Folds a partial update in, clamping numeric fields to their bounds.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(on_off) = update.on_off {
            self.on_off = on_off;
        }
        if let Some(mode) = update.work_mode {
            self.work_mode = mode;
        }
        if let Some(scene) = update.scene {
            self.scene = scene;
        }
        if let Some(v) = update.brightness {
            self.set(Field::Brightness, v);
        }
        if let Some(v) = update.temperature {
            self.set(Field::Temperature, v);
        }
        if let Some(v) = update.hue {
            self.set(Field::Hue, v);
        }
        if let Some(v) = update.saturation {
            self.set(Field::Saturation, v);
        }
        if let Some(v) = update.value {
            self.set(Field::Value, v);
        }
        if let Some(v) = update.timer_minutes {
            self.set(Field::Timer, v);
        }
        if let Some(time) = update.scheduled_time {
            self.scheduled_time = time;
        }
    }

    /// Clock time, formatted `HH:MM`, at which the current timer length
    /// would fire counting from `now`.
    ///
    /// The caller supplies a zoned `now` so the rendering matches the
    /// household's timezone.
    pub fn fire_time<Tz: TimeZone>(&self, now: DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        (now + chrono::Duration::minutes(i64::from(self.timer_minutes)))
            .format("%H:%M")
            .to_string()
    }

    // ========== Field table ==========

    fn get(&self, field: Field) -> u16 {
        match field {
            Field::Brightness => self.brightness,
            Field::Temperature => self.temperature,
            Field::Hue => self.hue,
            Field::Saturation => self.saturation,
            Field::Value => self.value,
            Field::Timer => self.timer_minutes,
            Field::Step => self.step,
        }
    }

    fn set(&mut self, field: Field, value: u16) {
        let (lo, hi) = field.bounds();
        let value = value.clamp(lo, hi);
        match field {
            Field::Brightness => self.brightness = value,
            Field::Temperature => self.temperature = value,
            Field::Hue => self.hue = value,
            Field::Saturation => self.saturation = value,
            Field::Value => self.value = value,
            Field::Timer => self.timer_minutes = value,
            Field::Step => self.step = value,
        }
    }

    fn adjust(&mut self, field: Field, delta: i32) {
        let (lo, hi) = field.bounds();
        let next = (i32::from(self.get(field)) + delta).clamp(i32::from(lo), i32::from(hi));
        // Safe: next is clamped into u16 range.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        self.set(field, next as u16);
    }

    fn shift_step(&mut self, delta: i32) {
        let last = i32::try_from(STEP_LADDER.len() - 1).unwrap_or(i32::MAX);
        let index = i32::try_from(self.step_index).unwrap_or(last);
        // Safe: clamped to the ladder range.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let next = (index + delta).clamp(0, last) as usize;
        self.step_index = next;
        self.step = STEP_LADDER[next];
    }
}
