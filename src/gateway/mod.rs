// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated session to the vendor cloud gateway.
//!
//! This module holds everything that touches the network: the device session
//! client ([`LampClient`]), its configuration ([`GatewayConfig`]), the wire
//! shapes and normalization table ([`wire`]), and the out-of-band phone + OTP
//! login flow ([`LoginFlow`]).
//!
//! # Examples
//!
//! ```no_run
//! use cloudlamp::gateway::{GatewayConfig, LampClient};
//! use cloudlamp::types::{Brightness, WhiteTemperature};
//!
//! # async fn example() -> cloudlamp::Result<()> {
//! let config = GatewayConfig::new("device-id", "long-lived-credential");
//! let client = LampClient::new(config)?;
//!
//! let snapshot = client.states().await?;
//! println!("lamp is on: {:?}", snapshot.on_off);
//!
//! client
//!     .set_white(Brightness::new(50)?, WhiteTemperature::new(30)?)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
pub mod wire;

pub use auth::{AuthorizationCode, LoginFlow, PendingVerification};
pub use client::LampClient;
pub use config::GatewayConfig;
pub use wire::StateSnapshot;

use serde_json::Value;

use crate::error::Error;

/// Translates a non-success gateway response into an [`Error::Api`].
///
/// The gateway reports failures as `{"state": {"title": …, "message": …}}`;
/// when either field is absent the raw body stands in as fallback.
pub(crate) async fn api_error(response: reqwest::Response) -> Error {
    let body = response.text().await.unwrap_or_default();
    let json: Option<Value> = serde_json::from_str(&body).ok();
    let state = json.as_ref().and_then(|j| j.get("state"));
    let title = state
        .and_then(|s| s.get("title"))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or("Error")
        .to_string();
    let message = state
        .and_then(|s| s.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map_or(body, ToString::to_string);
    Error::Api { title, message }
}
