// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local device-state mirror.
//!
//! [`LampState`] keeps the last-known normalized state of the lamp plus the
//! UI-only step control, and offers clamped increment/decrement/reset
//! operations over its numeric fields. It is pure and never fails: invalid
//! input saturates at the field bounds instead of erroring.
//!
//! # Examples
//!
//! ```
//! use cloudlamp::state::{Field, LampState};
//!
//! let mut state = LampState::default();
//! assert_eq!(state.brightness(), 50);
//!
//! state.increment(Field::Brightness);
//! assert_eq!(state.brightness(), 51); // step starts at 1
//!
//! state.reset(Field::Step);
//! state.increment(Field::Brightness);
//! assert_eq!(state.brightness(), 61); // default step is 10
//! ```

mod lamp_state;

pub use lamp_state::{Field, LampState, STEP_LADDER, StateUpdate};
