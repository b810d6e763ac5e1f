// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The authenticated device session client.

use parking_lot::RwLock;
use reqwest::{Client, Method, StatusCode, header};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::api_error;
use super::config::GatewayConfig;
use super::wire::{DesiredState, DeviceStateResponse, LampCommand, StateSnapshot};
use crate::error::{Error, Result};
use crate::types::{Brightness, HsvColor, Scene, SleepTimer, WhiteTemperature};

/// Body of the session-token endpoint.
#[derive(Debug, Deserialize)]
struct SessionToken {
    token: String,
}

/// Authenticated HTTP session to the vendor cloud gateway.
///
/// The client binds one device, holds the immutable long-lived credential,
/// and caches a short-lived session token that it acquires and renews
/// transparently. The token is never exposed to callers.
///
/// Every operation funnels through one request primitive: attach the session
/// token (fetching one first if absent), send, and on an expired-token
/// response fetch a fresh token exactly once and retry. A second rejection
/// surfaces as [`Error::Api`] rather than looping.
///
/// The client is `Send + Sync`; concurrent calls share only the token cache.
/// When a refresh is already in flight, concurrent callers await its result
/// instead of issuing redundant token fetches.
///
/// # Examples
///
/// ```no_run
/// use cloudlamp::gateway::{GatewayConfig, LampClient};
///
/// # async fn example() -> cloudlamp::Result<()> {
/// let client = LampClient::new(GatewayConfig::new("device-id", "credential"))?;
/// client.set_on_off(true).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LampClient {
    http: Client,
    config: GatewayConfig,
    session_token: RwLock<Option<String>>,
    refresh_gate: Mutex<()>,
}

impl LampClient {
    /// Creates a client for the configured device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the HTTP client cannot be created.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(Self {
            http,
            config,
            session_token: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    // ========== Reads ==========

    /// Fetches and normalizes the current reported state of the lamp.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn states(&self) -> Result<StateSnapshot> {
        let body = self.exchange(Method::GET, None).await?;
        let parsed: DeviceStateResponse = serde_json::from_value(body)
            .map_err(|e| Error::api(format!("unexpected reported state: {e}")))?;
        Ok(StateSnapshot::from_reported(&parsed.reported_state))
    }

    // ========== Writes ==========

    /// Powers the lamp on or off.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn set_on_off(&self, value: bool) -> Result<()> {
        self.write(&LampCommand::OnOff(value)).await
    }

    /// Switches to white mode with the given brightness and temperature.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn set_white(
        &self,
        brightness: Brightness,
        temperature: WhiteTemperature,
    ) -> Result<()> {
        self.write(&LampCommand::White(brightness, temperature))
            .await
    }

    /// Switches to colour mode with the given HSV color.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn set_color(&self, color: HsvColor) -> Result<()> {
        self.write(&LampCommand::Colour(color)).await
    }

    /// Activates a vendor scene preset.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn set_scene(&self, scene: Scene) -> Result<()> {
        self.write(&LampCommand::Scene(scene)).await
    }

    /// Arms the sleep timer; 0 minutes cancels the countdown.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn set_timer(&self, timer: SleepTimer) -> Result<()> {
        self.write(&LampCommand::Timer(timer)).await
    }

    async fn write(&self, command: &LampCommand) -> Result<()> {
        self.exchange(Method::PUT, Some(command.entries()))
            .await
            .map(|_| ())
    }

    // ========== Request primitive ==========

    /// Performs one authenticated exchange against the device-state endpoint.
    ///
    /// An expired session token is refreshed and the request retried at most
    /// once; every other non-success response becomes an [`Error::Api`].
    async fn exchange(&self, method: Method, states: Option<Vec<DesiredState>>) -> Result<Value> {
        let url = self.config.state_url();
        let body = states.map(|entries| {
            json!({
                "desired_state": entries,
                "device_id": self.config.device_id(),
            })
        });
        let payload = body
            .as_ref()
            .map_or_else(|| String::from("null"), ToString::to_string);

        let token = match self.cached_token() {
            Some(token) => token,
            None => self.refresh_session_token(None).await?,
        };

        let mut response = self
            .send(method.clone(), &url, body.as_ref(), &token)
            .await
            .inspect_err(|e| tracing::error!(request = %payload, error = %e, "gateway request failed"))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::error!(request = %payload, "session token rejected, fetching a new one");
            let fresh = self.refresh_session_token(Some(&token)).await?;
            response = self
                .send(method, &url, body.as_ref(), &fresh)
                .await
                .inspect_err(|e| tracing::error!(request = %payload, error = %e, "gateway request failed"))?;

            if response.status() == StatusCode::UNAUTHORIZED {
                *self.session_token.write() = None;
                let err = api_error(response).await;
                tracing::error!(request = %payload, error = %err, "refreshed session token rejected");
                return Err(err);
            }
        }

        if !response.status().is_success() {
            let err = api_error(response).await;
            tracing::error!(request = %payload, error = %err, "gateway request unsuccessful");
            return Err(err);
        }

        let text = self.read_body(response).await?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| Error::api(format!("invalid response body: {e}")))?;
        tracing::info!(request = %payload, response = %value, "gateway request succeeded");
        Ok(value)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        token: &str,
    ) -> Result<reqwest::Response> {
        let mut request = self
            .http
            .request(method, url)
            .header("x-auth-jwt", token);
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| Error::transport(&e, self.config.timeout()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String> {
        response
            .text()
            .await
            .map_err(|e| Error::transport(&e, self.config.timeout()))
    }

    // ========== Session token ==========

    fn cached_token(&self) -> Option<String> {
        self.session_token.read().clone()
    }

    /// Fetches a session token from the long-lived credential.
    ///
    /// Single-flight under `refresh_gate`: a caller that waited on the gate
    /// while somebody else refreshed reuses the replacement token as long as
    /// it differs from the one that just failed for them.
    async fn refresh_session_token(&self, stale: Option<&str>) -> Result<String> {
        let _guard = self.refresh_gate.lock().await;

        if let Some(current) = self.cached_token()
            && stale != Some(current.as_str())
        {
            return Ok(current);
        }

        let response = self
            .http
            .get(self.config.token_url())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.credential()),
            )
            .send()
            .await
            .map_err(|e| Error::transport(&e, self.config.timeout()))?;

        if !response.status().is_success() {
            let err = api_error(response).await;
            tracing::error!(error = %err, "session token fetch failed");
            return Err(err);
        }

        let text = self.read_body(response).await?;
        let parsed: SessionToken = serde_json::from_str(&text)
            .map_err(|e| Error::api(format!("invalid token response: {e}")))?;
        tracing::info!("fetched new session token");

        *self.session_token.write() = Some(parsed.token.clone());
        Ok(parsed.token)
    }
}
