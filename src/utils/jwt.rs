use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Access tokens are long-lived; the frontend has no refresh flow.
const TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Claims {
    pub sub: i64, // user id
    pub exp: usize,
}

/// Create a signed JWT for a user id.
pub fn create_jwt(user_id: i64, secret: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(TOKEN_LIFETIME_DAYS))
        .ok_or_else(|| {
            Box::<dyn std::error::Error + Send + Sync>::from("failed to compute token expiration")
        })?
        .timestamp() as usize;

    let token = encode(
        &Header::default(),
        &Claims {
            sub: user_id,
            exp: expiration,
        },
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(token)
}

/// Decode and validate a JWT, returning its claims.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, Box<dyn std::error::Error + Send + Sync>> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_subject() {
        let token = create_jwt(42, "secret").expect("encode");
        let claims = decode_jwt(&token, "secret").expect("decode");
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_jwt(42, "secret").expect("encode");
        assert!(decode_jwt(&token, "other").is_err());
    }
}
