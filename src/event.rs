//! Gateway event normalization and response shaping
//!
//! API Gateway delivers loosely-typed payloads: path parameters, a map of
//! query string values (always strings from the gateway, but direct Lambda
//! invocations may send numbers or booleans) and an `httpMethod` marker. This
//! module turns them into one `RequestParameters` before anything else runs,
//! and turns the outcome back into either a bare JSON value or a
//! status-coded envelope.

use crate::aggregate::AggregateResult;
use crate::error::{Result, SpotPriceError};
use crate::logging::LogLevel;
use crate::query::{OsFamily, RequestParameters};
use crate::window::LookbackDuration;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw event as delivered by API Gateway (or a direct invocation)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub path_parameters: Option<PathParameters>,
    #[serde(default)]
    pub query_string_parameters: Option<QueryStringParameters>,
    /// Present (with any value) when the event came through the HTTP gateway
    #[serde(default, deserialize_with = "present")]
    pub http_method: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathParameters {
    #[serde(default, deserialize_with = "lenient_string")]
    pub os: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub instance_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryStringParameters {
    #[serde(default, deserialize_with = "lenient_string")]
    pub days: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hours: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub minutes: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub seconds: Option<String>,
    /// Comma-joined zone list
    #[serde(default, deserialize_with = "lenient_string")]
    pub az: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub minimum: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub loglevel: Option<String>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(if b { "1" } else { "0" }.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string, number or boolean, got {}",
            other
        ))),
    }
}

/// How the result should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// The JSON-encoded result alone
    Bare,
    /// A JSON-encoded `{statusCode, headers, body}` envelope
    Envelope,
}

/// A normalized request plus how to answer it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub params: RequestParameters,
    pub shape: ResponseShape,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a duration component; missing or blank means zero
pub fn parse_count(field: &str, value: Option<&str>) -> Result<u64> {
    match non_empty(value) {
        None => Ok(0),
        Some(v) => v.parse::<u64>().map_err(|_| {
            SpotPriceError::validation(
                field,
                format!("{} must be a non-negative integer, got: {}", field, v),
            )
        }),
    }
}

/// Parse a truthy flag ("1"/"0", "true"/"false", "yes"/"no", "on"/"off")
pub fn parse_flag(field: &str, value: Option<&str>) -> Result<bool> {
    let Some(v) = non_empty(value) else {
        return Ok(false);
    };
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => other.parse::<i64>().map(|n| n != 0).map_err(|_| {
            SpotPriceError::validation(field, format!("{} must be a boolean flag, got: {}", field, v))
        }),
    }
}

/// Split a comma-joined zone list, dropping blanks
pub fn split_zones(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .map(str::to_string)
        .collect()
}

/// Map a gateway event onto `RequestParameters`
pub fn normalize_event(event: &GatewayEvent) -> Result<NormalizedRequest> {
    let path = event.path_parameters.clone().unwrap_or_default();
    let query = event.query_string_parameters.clone().unwrap_or_default();

    let instance_type = non_empty(path.instance_type.as_deref())
        .ok_or_else(|| SpotPriceError::validation("type", "Instance type is required"))?
        .to_string();

    let os_family = match non_empty(path.os.as_deref()) {
        Some(os) => os.parse::<OsFamily>()?,
        None => OsFamily::default(),
    };

    let duration = LookbackDuration::new(
        parse_count("days", query.days.as_deref())?,
        parse_count("hours", query.hours.as_deref())?,
        parse_count("minutes", query.minutes.as_deref())?,
        parse_count("seconds", query.seconds.as_deref())?,
    );

    let log_level = non_empty(query.loglevel.as_deref())
        .map(str::parse::<LogLevel>)
        .transpose()?;

    let params = RequestParameters {
        instance_type,
        os_family,
        zones: split_zones(query.az.as_deref()),
        duration,
        want_minimum: parse_flag("minimum", query.minimum.as_deref())?,
        log_level,
    };

    Ok(NormalizedRequest {
        params,
        shape: response_shape(event),
    })
}

/// Gateway requests (anything carrying `httpMethod`) get an envelope
pub fn response_shape(event: &GatewayEvent) -> ResponseShape {
    if event.http_method.is_some() {
        ResponseShape::Envelope
    } else {
        ResponseShape::Bare
    }
}

/// `{statusCode, headers, body}` envelope API Gateway expects from a proxy integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl GatewayResponse {
    pub fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }
}

/// HTTP status an error is reported with inside an envelope
pub fn status_for_error(error: &SpotPriceError) -> u16 {
    match error {
        SpotPriceError::Validation { .. } => 400,
        SpotPriceError::NoData { .. } => 404,
        SpotPriceError::Fetch { .. } => 502,
        SpotPriceError::Config(_) | SpotPriceError::Json(_) => 500,
    }
}

/// Render a successful result
pub fn shape_response(result: &AggregateResult, shape: ResponseShape) -> Result<String> {
    let body = serde_json::to_string(result)?;
    match shape {
        ResponseShape::Bare => Ok(body),
        ResponseShape::Envelope => Ok(serde_json::to_string(&GatewayResponse::json(200, body))?),
    }
}

/// Render a lookup outcome
///
/// Envelope callers get errors as status-coded envelopes; bare callers get the error back.
pub fn render_outcome(outcome: Result<AggregateResult>, shape: ResponseShape) -> Result<String> {
    match (outcome, shape) {
        (Ok(result), shape) => shape_response(&result, shape),
        (Err(e), ResponseShape::Bare) => Err(e),
        (Err(e), ResponseShape::Envelope) => {
            let body = serde_json::to_string(&serde_json::json!({ "error": e.to_string() }))?;
            Ok(serde_json::to_string(&GatewayResponse::json(
                status_for_error(&e),
                body,
            ))?)
        }
    }
}
