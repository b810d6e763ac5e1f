// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for the gateway session client.

use std::time::Duration;

/// Configuration for a [`LampClient`](super::LampClient).
///
/// Binds the controlled device and the long-lived credential, and carries the
/// endpoint URLs and the request timeout. The URLs default to the vendor
/// cloud and are overridable for testing against a local mock.
///
/// # Examples
///
/// ```
/// use cloudlamp::gateway::GatewayConfig;
/// use std::time::Duration;
///
/// let config = GatewayConfig::new("device-id", "credential")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.device_id(), "device-id");
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    device_id: String,
    credential: String,
    gateway_url: String,
    token_url: String,
    timeout: Duration,
}

impl GatewayConfig {
    /// Default base URL of the device-state gateway.
    pub const DEFAULT_GATEWAY_URL: &'static str = "https://gateway.iot.sberdevices.ru";

    /// Default endpoint issuing session tokens from the long-lived credential.
    pub const DEFAULT_TOKEN_URL: &'static str =
        "https://companion.devices.sberbank.ru/v13/smarthome/token";

    /// Default base URL of the phone + OTP login endpoints.
    pub const DEFAULT_AUTH_URL: &'static str =
        "https://companion.devices.sberbank.ru/v13/smarthome/auth";

    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a configuration for the given device and credential.
    ///
    /// # Arguments
    ///
    /// * `device_id` - The gateway identifier of the lamp
    /// * `credential` - The long-lived credential that mints session tokens;
    ///   loading it from a file or secret store is the caller's concern
    #[must_use]
    pub fn new(device_id: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            credential: credential.into(),
            gateway_url: Self::DEFAULT_GATEWAY_URL.to_string(),
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the device-state gateway base URL.
    #[must_use]
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    /// Overrides the session-token endpoint URL.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the long-lived credential.
    pub(crate) fn credential(&self) -> &str {
        &self.credential
    }

    /// Returns the session-token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the device-state endpoint URL for the bound device.
    #[must_use]
    pub fn state_url(&self) -> String {
        format!(
            "{}/gateway/v1/devices/{}/state",
            self.gateway_url, self.device_id
        )
    }
}
