use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Per-field validation messages keyed by the request's (camelCase) field path.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Unified application error type that maps to JSON HTTP responses.
///
/// Body format: `{ "error": { "code": "...", "message": "...", "fields": { ... } } }`,
/// where `fields` is present only for validation failures.
#[derive(Debug)]
pub enum AppError {
    /// 400 Bad Request
    BadRequest(String),
    /// 400 Bad Request with per-field messages
    Validation {
        message: String,
        fields: FieldErrors,
    },
    /// 401 Unauthorized
    Unauthorized(String),
    /// 403 Forbidden
    Forbidden(String),
    /// 404 Not Found
    NotFound(String),
    /// 409 Conflict
    Conflict(String),
    /// 500 Internal Server Error (wraps any error, logs details, returns generic message)
    Internal(anyhow::Error),
}

impl AppError {
    /// Build a validation error from `validator` output.
    #[must_use]
    pub fn invalid(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        flatten_errors(None, errors, &mut fields);
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    /// Validation error for a single field.
    #[must_use]
    pub fn invalid_field(
        message: impl Into<String>,
        field: &str,
        reason: impl Into<String>,
    ) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![reason.into()]);
        Self::Validation {
            message: message.into(),
            fields,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            Self::Validation { message, fields } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                message,
                Some(fields),
            ),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            Self::Internal(err) => {
                tracing::error!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match fields {
            Some(fields) => json!({
                "error": { "code": code, "message": message, "fields": fields }
            }),
            None => json!({
                "error": { "code": code, "message": message }
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Allow `?` to automatically convert any `anyhow::Error` into `AppError::Internal`.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

fn flatten_errors(prefix: Option<&str>, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let name = to_camel_case(field);
        let path = prefix.map_or_else(|| name.clone(), |p| format!("{p}.{name}"));
        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = list.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string)
                });
                out.entry(path).or_default().extend(messages);
            }
            ValidationErrorsKind::Struct(nested) => flatten_errors(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_errors(Some(&format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct ListingFields {
        #[validate(length(min = 1, message = "Brand is required"))]
        brand_name: String,
        #[validate(range(min = 0.0))]
        price: f64,
    }

    #[test]
    fn test_camel_case_field_names() {
        assert_eq!(to_camel_case("mobile_number"), "mobileNumber");
        assert_eq!(to_camel_case("price"), "price");
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let listing = ListingFields {
            brand_name: String::new(),
            price: -1.0,
        };
        let Err(errors) = listing.validate() else {
            return;
        };
        let AppError::Validation { fields, .. } = AppError::invalid("Invalid", &errors) else {
            return;
        };
        assert_eq!(fields.get("brandName"), Some(&vec!["Brand is required".to_string()]));
        assert_eq!(fields.get("price"), Some(&vec!["range".to_string()]));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::BadRequest(String::new()), StatusCode::BAD_REQUEST),
            (
                AppError::invalid_field("Invalid", "price", "must be >= 0"),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Unauthorized(String::new()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden(String::new()), StatusCode::FORBIDDEN),
            (AppError::NotFound(String::new()), StatusCode::NOT_FOUND),
            (AppError::Conflict(String::new()), StatusCode::CONFLICT),
            (
                AppError::Internal(anyhow::anyhow!("db down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
