// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `cloudlamp` - A Rust library to control a cloud-connected smart lamp.
//!
//! This library provides an async session client for the vendor IoT gateway
//! and a local mirror of the lamp state with clamped, steppable fields. It is
//! the core of a remote-control front end: the embedding layer (a chat bot,
//! a CLI, …) calls the client to fetch or mutate remote state, then folds the
//! result into the state mirror and renders a view from it.
//!
//! # Supported Features
//!
//! - **Power control**: Turn the lamp on/off
//! - **White mode**: Brightness and color temperature
//! - **Colour mode**: HSV color
//! - **Scenes**: Vendor-defined presets (candle, sunset, …)
//! - **Sleep timer**: Countdown with a derived fire time
//! - **Login**: Out-of-band phone + OTP flow minting the long-lived credential
//!
//! # Quick Start
//!
//! ```no_run
//! use cloudlamp::{GatewayConfig, LampClient, LampState, state::Field};
//!
//! #[tokio::main]
//! async fn main() -> cloudlamp::Result<()> {
//!     // The long-lived credential comes from external storage; reading it
//!     // is the caller's concern.
//!     let config = GatewayConfig::new("device-id", "long-lived-credential");
//!     let client = LampClient::new(config)?;
//!
//!     // Mirror the remote state locally.
//!     let mut state = LampState::from_snapshot(&client.states().await?);
//!
//!     // Nudge brightness up by the current step and push it to the lamp.
//!     state.increment(Field::Brightness);
//!     client
//!         .set_white(
//!             cloudlamp::types::Brightness::clamped(state.brightness()),
//!             cloudlamp::types::WhiteTemperature::clamped(state.temperature()),
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Gateway failures come in exactly three kinds - [`Error::Timeout`],
//! [`Error::Connection`] and [`Error::Api`] - so callers can distinguish
//! transient from permanent failures. The state mirror never fails; invalid
//! input is clamped, not rejected.

pub mod error;
pub mod gateway;
pub mod state;
pub mod types;

pub use error::{Error, Result, ValueError};
pub use gateway::{GatewayConfig, LampClient, LoginFlow, StateSnapshot};
pub use state::{Field, LampState, STEP_LADDER, StateUpdate};
pub use types::{Brightness, HsvColor, Scene, SleepTimer, WhiteTemperature, WorkMode};
