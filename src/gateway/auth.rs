// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Out-of-band phone + OTP login flow.
//!
//! Minting the long-lived credential takes three distinct network calls:
//! submit the phone number, submit the SMS one-time code, then exchange the
//! resulting authorization code. Each step returns an opaque value the next
//! step consumes, encoded as separate types so a flow cannot skip or repeat
//! a completed step. A failed verification leaves the pending step usable
//! for another attempt.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::api_error;
use super::config::GatewayConfig;
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct CodeRequested {
    request_id: String,
}

#[derive(Debug, Deserialize)]
struct CodeVerified {
    auth_code: String,
}

#[derive(Debug, Deserialize)]
struct TokenIssued {
    refresh_token: String,
}

/// The phone + OTP login flow against the vendor auth endpoints.
///
/// # Examples
///
/// ```no_run
/// use cloudlamp::gateway::LoginFlow;
///
/// # async fn example() -> cloudlamp::Result<()> {
/// let flow = LoginFlow::new()?;
/// let pending = flow.request_code("+79990000000").await?;
/// // ... the user reads the SMS ...
/// let authorized = pending.submit_code("123456").await?;
/// let credential = authorized.exchange().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LoginFlow {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl LoginFlow {
    /// Creates a flow against the default vendor auth endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_base_url(GatewayConfig::DEFAULT_AUTH_URL)
    }

    /// Creates a flow against a custom auth base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the HTTP client cannot be created.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let timeout = GatewayConfig::DEFAULT_TIMEOUT;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            timeout,
        })
    }

    /// Submits the phone number; the vendor sends an SMS one-time code.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn request_code(&self, phone: &str) -> Result<PendingVerification<'_>> {
        let requested: CodeRequested = self
            .post("sms", &json!({ "phone": phone }))
            .await?;
        tracing::info!("verification code requested");
        Ok(PendingVerification {
            flow: self,
            request_id: requested.request_id,
        })
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::transport(&e, self.timeout))?;

        if !response.status().is_success() {
            let err = api_error(response).await;
            tracing::error!(step = path, error = %err, "login step failed");
            return Err(err);
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(&e, self.timeout))?;
        serde_json::from_str(&text).map_err(|e| Error::api(format!("invalid login response: {e}")))
    }
}

/// A login awaiting its SMS one-time code.
#[derive(Debug)]
pub struct PendingVerification<'a> {
    flow: &'a LoginFlow,
    request_id: String,
}

impl<'a> PendingVerification<'a> {
    /// Submits the SMS one-time code.
    ///
    /// A rejected code returns [`Error::Api`] and leaves this step usable
    /// for another attempt.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn submit_code(&self, code: &str) -> Result<AuthorizationCode<'a>> {
        let verified: CodeVerified = self
            .flow
            .post(
                "verify",
                &json!({ "request_id": self.request_id, "code": code }),
            )
            .await?;
        tracing::info!("verification code accepted");
        Ok(AuthorizationCode {
            flow: self.flow,
            code: verified.auth_code,
        })
    }
}

/// A verified login ready to be exchanged for the long-lived credential.
#[derive(Debug)]
pub struct AuthorizationCode<'a> {
    flow: &'a LoginFlow,
    code: String,
}

impl AuthorizationCode<'_> {
    /// Exchanges the authorization code for the long-lived credential.
    ///
    /// The returned string is what [`GatewayConfig::new`] expects as
    /// `credential`; persisting it is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns one of the three gateway error kinds.
    pub async fn exchange(self) -> Result<String> {
        let issued: TokenIssued = self
            .flow
            .post("token", &json!({ "auth_code": self.code }))
            .await?;
        tracing::info!("long-lived credential issued");
        Ok(issued.refresh_token)
    }
}
