// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the gateway session client using wiremock.

use std::time::Duration;

use cloudlamp::gateway::{GatewayConfig, LampClient, LoginFlow};
use cloudlamp::types::{Brightness, HsvColor, Scene, SleepTimer, WhiteTemperature, WorkMode};
use cloudlamp::Error;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEVICE_ID: &str = "lamp-1";
const CREDENTIAL: &str = "home-token";
const STATE_PATH: &str = "/gateway/v1/devices/lamp-1/state";

fn config(server: &MockServer) -> GatewayConfig {
    GatewayConfig::new(DEVICE_ID, CREDENTIAL)
        .with_gateway_url(server.uri())
        .with_token_url(format!("{}/token", server.uri()))
}

/// Mounts a token endpoint that always issues the same session token.
async fn mount_token(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/token"))
        .and(header("authorization", format!("Bearer {CREDENTIAL}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": token
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Reads
// ============================================================================

mod reads {
    use super::*;

    #[tokio::test]
    async fn states_normalizes_reported_payload() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("GET"))
            .and(path(STATE_PATH))
            .and(header("x-auth-jwt", "jwt-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reported_state": [
                    {"key": "online", "bool_value": true},
                    {"key": "on_off", "bool_value": true},
                    {"key": "work_mode", "enum_value": "colour"},
                    {"key": "light_scene", "enum_value": "candle"},
                    {"key": "bright_value_v2", "integer_value": 500},
                    {"key": "temp_value_v2", "integer_value": "300"},
                    {"key": "colour_data_v2", "color_value": {"h": 180, "s": 500, "v": 800}},
                    {"key": "sleep_timer", "integer_value": 7200}
                ]
            })))
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        let snapshot = client.states().await.unwrap();

        assert_eq!(snapshot.online, Some(true));
        assert_eq!(snapshot.on_off, Some(true));
        assert_eq!(snapshot.work_mode, Some(WorkMode::Colour));
        assert_eq!(snapshot.scene, Some(Scene::Candle));
        assert_eq!(snapshot.brightness, Some(50));
        assert_eq!(snapshot.temperature, Some(30));
        assert_eq!(snapshot.hue, Some(180));
        assert_eq!(snapshot.saturation, Some(50));
        assert_eq!(snapshot.value, Some(80));
        assert_eq!(snapshot.timer_minutes, Some(120));
    }
}

// ============================================================================
// Writes and vendor scaling
// ============================================================================

mod writes {
    use super::*;

    #[tokio::test]
    async fn set_white_transmits_scaled_payload() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .and(body_json(serde_json::json!({
                "desired_state": [
                    {"key": "light_mode", "type": "ENUM", "enum_value": "white"},
                    {"key": "light_brightness", "type": "INTEGER", "integer_value": 500},
                    {"key": "light_colour_temp", "type": "INTEGER", "integer_value": 300}
                ],
                "device_id": DEVICE_ID
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        client
            .set_white(
                Brightness::new(50).unwrap(),
                WhiteTemperature::new(30).unwrap(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn set_timer_transmits_seconds() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .and(body_json(serde_json::json!({
                "desired_state": [
                    {"key": "sleep_timer", "type": "INTEGER", "integer_value": 7200}
                ],
                "device_id": DEVICE_ID
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        client.set_timer(SleepTimer::new(120).unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn set_color_transmits_tenths() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .and(body_json(serde_json::json!({
                "desired_state": [
                    {"key": "light_mode", "type": "ENUM", "enum_value": "colour"},
                    {
                        "key": "light_colour",
                        "colour_value": {"h": 180, "s": 500, "v": 800},
                        "string_value": "{\"h\":180,\"s\":500,\"v\":800}"
                    }
                ],
                "device_id": DEVICE_ID
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        client
            .set_color(HsvColor::new(180, 50, 80).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn set_scene_selects_scene_mode() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .and(body_json(serde_json::json!({
                "desired_state": [
                    {"key": "light_mode", "type": "ENUM", "enum_value": "scene"},
                    {"key": "light_scene", "type": "ENUM", "enum_value": "sunset"}
                ],
                "device_id": DEVICE_ID
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        client.set_scene(Scene::Sunset).await.unwrap();
    }
}

// ============================================================================
// Session token lifecycle
// ============================================================================

mod session_token {
    use super::*;

    #[tokio::test]
    async fn expired_token_is_refreshed_exactly_once() {
        let server = MockServer::start().await;

        // First fetch issues a token the gateway has already expired.
        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "stale"
            })))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        // The refresh issues a working replacement.
        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "fresh"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .and(header("x-auth-jwt", "stale"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .and(header("x-auth-jwt", "fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        client.set_on_off(true).await.unwrap();

        // Mock expectations assert exactly two device attempts and exactly
        // one refresh beyond the initial token acquisition.
    }

    #[tokio::test]
    async fn second_rejection_surfaces_api_error_without_looping() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "state": {"title": "Unauthorized", "message": "token expired"}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        let err = client.set_on_off(true).await.unwrap_err();

        assert!(
            matches!(err, Error::Api { ref title, .. } if title == "Unauthorized"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_callers_share_one_token_fetch() {
        let server = MockServer::start().await;

        // A slow token endpoint widens the window in which every caller
        // sees an empty cache; only one fetch may go out.
        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"token": "jwt-1"}))
                    .set_delay(Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .and(header("x-auth-jwt", "jwt-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(8)
            .mount(&server)
            .await;

        let client = std::sync::Arc::new(LampClient::new(config(&server)).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let client = std::sync::Arc::clone(&client);
                tokio::spawn(async move { client.set_on_off(true).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
    }

    #[tokio::test]
    async fn token_is_reused_across_calls() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .and(header("x-auth-jwt", "jwt-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(3)
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        for on in [true, false, true] {
            client.set_on_off(on).await.unwrap();
        }
    }
}

// ============================================================================
// Error taxonomy
// ============================================================================

mod error_taxonomy {
    use super::*;

    #[tokio::test]
    async fn slow_response_is_a_timeout_error() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("GET"))
            .and(path(STATE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reported_state": []}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client =
            LampClient::new(config(&server).with_timeout(Duration::from_millis(250))).unwrap();
        let err = client.states().await.unwrap_err();

        assert!(matches!(err, Error::Timeout(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn refused_connection_is_a_connection_error() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        // Token endpoint works, the device gateway does not listen.
        let cfg = GatewayConfig::new(DEVICE_ID, CREDENTIAL)
            .with_gateway_url("http://127.0.0.1:59999")
            .with_token_url(format!("{}/token", server.uri()));

        let client = LampClient::new(cfg).unwrap();
        let err = client.states().await.unwrap_err();

        assert!(
            matches!(err, Error::Connection(_)),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn failure_body_yields_title_and_message() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "state": {"title": "Device unreachable", "message": "the lamp is offline"}
            })))
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        let err = client.set_on_off(true).await.unwrap_err();

        match err {
            Error::Api { title, message } => {
                assert_eq!(title, "Device unreachable");
                assert_eq!(message, "the lamp is offline");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn failure_without_body_falls_back_to_generic() {
        let server = MockServer::start().await;
        mount_token(&server, "jwt-1").await;

        Mock::given(method("PUT"))
            .and(path(STATE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("gateway exploded"))
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        let err = client.set_on_off(true).await.unwrap_err();

        match err {
            Error::Api { title, message } => {
                assert_eq!(title, "Error");
                assert_eq!(message, "gateway exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn token_fetch_failure_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "state": {"title": "Forbidden", "message": "credential revoked"}
            })))
            .mount(&server)
            .await;

        let client = LampClient::new(config(&server)).unwrap();
        let err = client.set_on_off(true).await.unwrap_err();

        assert!(
            matches!(err, Error::Api { ref title, .. } if title == "Forbidden"),
            "unexpected error: {err}"
        );
    }
}

// ============================================================================
// Phone + OTP login flow
// ============================================================================

mod login {
    use super::*;

    #[tokio::test]
    async fn full_flow_mints_credential() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/sms"))
            .and(body_json(serde_json::json!({"phone": "+79990000000"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request_id": "req-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/verify"))
            .and(body_json(serde_json::json!({
                "request_id": "req-1",
                "code": "123456"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "auth_code": "code-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .and(body_json(serde_json::json!({"auth_code": "code-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "refresh_token": "long-lived"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let flow = LoginFlow::with_base_url(format!("{}/auth", server.uri())).unwrap();
        let pending = flow.request_code("+79990000000").await.unwrap();
        let authorized = pending.submit_code("123456").await.unwrap();
        let credential = authorized.exchange().await.unwrap();

        assert_eq!(credential, "long-lived");
    }

    #[tokio::test]
    async fn rejected_code_leaves_step_retryable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/sms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request_id": "req-1"
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/verify"))
            .and(body_json(serde_json::json!({
                "request_id": "req-1",
                "code": "000000"
            })))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "state": {"title": "Wrong code", "message": "try again"}
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/verify"))
            .and(body_json(serde_json::json!({
                "request_id": "req-1",
                "code": "123456"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "auth_code": "code-1"
            })))
            .mount(&server)
            .await;

        let flow = LoginFlow::with_base_url(format!("{}/auth", server.uri())).unwrap();
        let pending = flow.request_code("+79990000000").await.unwrap();

        let err = pending.submit_code("000000").await.unwrap_err();
        assert!(matches!(err, Error::Api { ref title, .. } if title == "Wrong code"));

        // The same pending step accepts another attempt.
        pending.submit_code("123456").await.unwrap();
    }
}
