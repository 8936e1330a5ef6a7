use crate::utils::response::ApiResponse;
use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use validator::Validate;

/// Validate a payload implementing `validator::Validate` and return an axum-compatible
/// error tuple on validation failure so handlers can `?` it.
pub fn validate_payload<T: Validate>(
    payload: &T,
) -> Result<(), (StatusCode, Json<ApiResponse<Value>>)> {
    if let Err(errors) = payload.validate() {
        let mut errors_map = serde_json::Map::new();
        for (field, errs) in errors.field_errors().iter() {
            let msgs: Vec<String> = errs
                .iter()
                .map(|e| e.message.clone().unwrap_or_else(|| "Invalid input".into()).to_string())
                .collect();
            errors_map.insert(field.to_string(), json!(msgs));
        }
        let response = ApiResponse::error_with_data(
            "Validation error",
            json!({ "errors": Value::Object(errors_map) }),
        );
        return Err((StatusCode::BAD_REQUEST, Json(response)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::register_schema::RegisterSchema;

    #[test]
    fn rejects_malformed_email_and_short_password() {
        let payload = RegisterSchema {
            name: "Ana".into(),
            email: "ana@nodomain".into(),
            phone: None,
            password: "123".into(),
        };
        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn accepts_well_formed_registration() {
        let payload = RegisterSchema {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: Some("7771234567".into()),
            password: "secret123".into(),
        };
        assert!(validate_payload(&payload).is_ok());
    }
}
