//! Request helpers shared by the route handlers
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::body::Bytes;
use http::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::public::{ApiError, FieldError};
use crate::api::state::AppState;
use crate::auth::{AuthUser, bearer_token, verify_token};

type SharedState = Arc<RwLock<AppState>>;

/// Query string pairs as a JSON object so GET and POST variants of an
/// endpoint validate the same way
pub fn query_to_object(query: HashMap<String, String>) -> Map<String, Value> {
    query
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}

/// Parse a JSON request body that must be an object
pub fn body_to_object(body: &Bytes) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::InvalidParams(vec![FieldError::new(
            "body",
            "Expected a JSON object",
        )])),
    }
}

/// Reads typed fields out of a loosely typed parameter object,
/// collecting every problem instead of stopping at the first one.
///
/// Numbers and booleans are accepted either as JSON values or as their
/// string forms since query strings only carry strings. `null` is the
/// same as a missing field.
pub struct ParamReader<'a> {
    values: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> ParamReader<'a> {
    pub fn new(values: &'a Map<String, Value>) -> Self {
        Self {
            values,
            errors: Vec::new(),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.values.get(field).filter(|v| !v.is_null())
    }

    /// Record a problem found by checks outside the reader
    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn string(&mut self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.reject(field, "Expected string");
                None
            }
        }
    }

    /// A string that must be present and non-empty
    pub fn required_string(&mut self, field: &str, message: &str) -> Option<String> {
        if self.get(field).is_none() {
            self.reject(field, "Required");
            return None;
        }
        let value = self.string(field)?;
        if value.trim().is_empty() {
            self.reject(field, message);
            return None;
        }
        Some(value)
    }

    /// A string that may be absent but is non-empty when present
    pub fn non_empty_string(&mut self, field: &str) -> Option<String> {
        let value = self.string(field)?;
        if value.is_empty() {
            self.reject(field, "String must contain at least 1 character(s)");
            return None;
        }
        Some(value)
    }

    /// A non-negative integer within `min..=max`
    pub fn integer(&mut self, field: &str, min: u32, max: u32) -> Option<u32> {
        let parsed = match self.get(field)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        let Some(n) = parsed else {
            self.reject(field, "Expected non-negative integer");
            return None;
        };
        if n < min as u64 {
            self.reject(
                field,
                format!("Number must be greater than or equal to {}", min),
            );
            return None;
        }
        if n > max as u64 {
            self.reject(field, format!("Number must be less than or equal to {}", max));
            return None;
        }
        Some(n as u32)
    }

    pub fn boolean(&mut self, field: &str) -> Option<bool> {
        let parsed = match self.get(field)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Value::Number(n) => match n.as_u64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            _ => None,
        };
        if parsed.is_none() {
            self.reject(field, "Expected boolean");
        }
        parsed
    }

    /// One of a fixed set of lowercase names, deserialized into `T`
    pub fn choice<T: DeserializeOwned>(&mut self, field: &str, options: &[&str]) -> Option<T> {
        let value = self.string(field)?;
        if options.contains(&value.as_str())
            && let Ok(choice) = serde_json::from_value::<T>(Value::String(value.clone()))
        {
            return Some(choice);
        }
        let expected = options
            .iter()
            .map(|o| format!("'{}'", o))
            .collect::<Vec<_>>()
            .join(" | ");
        self.reject(
            field,
            format!(
                "Invalid enum value. Expected {}, received '{}'",
                expected, value
            ),
        );
        None
    }

    /// Fail with every collected field error, if any
    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::InvalidParams(self.errors))
        }
    }
}

/// Resolve the bearer token on the request to a provider user
pub async fn authenticate(
    state: &SharedState,
    headers: &HeaderMap,
) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    let (http, auth_url, service_key) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.http.clone(),
            shared_state.config.auth_api_url.clone(),
            shared_state.config.auth_service_key.clone(),
        )
    };

    verify_token(&http, &auth_url, &service_key, token)
        .await
        .ok_or(ApiError::Unauthorized)
}
