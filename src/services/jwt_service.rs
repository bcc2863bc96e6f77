use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::Result;
use crate::utils::time::now;

/// Claims of a login token. The subject is the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims of a reset token. The subject is the email of the person that asked
/// for the reset and `randomNumber` ties the token to one recorded request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: String,
    #[serde(rename = "randomNumber")]
    pub random_number: i64,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    login_ttl: Duration,
    reset_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, login_ttl_minutes: i64, reset_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            login_ttl: Duration::minutes(login_ttl_minutes),
            reset_ttl: Duration::minutes(reset_ttl_minutes),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation
    }

    fn decode_claims<T: DeserializeOwned>(&self, token: &str) -> Option<T> {
        match decode::<T>(token, &self.decoding_key, &Self::validation()) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Rejected token: {}", e);
                None
            }
        }
    }

    pub fn generate_token(&self, username: &str, role: &str) -> Result<String> {
        let issued = now();
        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            iat: issued.timestamp(),
            exp: (issued + self.login_ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Signature and expiry check; `None` for anything that does not verify.
    pub fn decode_token(&self, token: &str) -> Option<Claims> {
        self.decode_claims(token)
    }

    pub fn extract_subject(&self, token: &str) -> Option<String> {
        self.decode_token(token).map(|claims| claims.sub)
    }

    /// True when the token verifies and was issued to `username`.
    pub fn validate_token(&self, token: &str, username: &str) -> bool {
        self.decode_token(token)
            .map(|claims| claims.sub == username)
            .unwrap_or(false)
    }

    pub fn generate_reset_token(&self, email: &str) -> Result<(String, ResetClaims)> {
        let issued = now();
        let claims = ResetClaims {
            sub: email.to_string(),
            random_number: rand::thread_rng().gen(),
            iat: issued.timestamp(),
            exp: (issued + self.reset_ttl).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok((token, claims))
    }

    pub fn decode_reset_token(&self, token: &str) -> Option<ResetClaims> {
        self.decode_claims(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("unit-test-secret", 30, 5)
    }

    #[test]
    fn login_token_carries_username_and_role() {
        let jwt = service();
        let token = jwt.generate_token("leroy", "applicant").unwrap();
        let claims = jwt.decode_token(&token).unwrap();
        assert_eq!(claims.sub, "leroy");
        assert_eq!(claims.role, "applicant");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(jwt.validate_token(&token, "leroy"));
        assert!(!jwt.validate_token(&token, "someone-else"));
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let token = JwtService::new("other-secret", 30, 5)
            .generate_token("leroy", "applicant")
            .unwrap();
        assert!(service().decode_token(&token).is_none());
        assert!(service().extract_subject("not.a.token").is_none());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let jwt = JwtService::new("unit-test-secret", -1, -1);
        let token = jwt.generate_token("leroy", "applicant").unwrap();
        assert!(jwt.decode_token(&token).is_none());
        let (reset, _) = jwt.generate_reset_token("leroy@example.com").unwrap();
        assert!(jwt.decode_reset_token(&reset).is_none());
    }

    #[test]
    fn reset_token_round_trips_its_random_number() {
        let jwt = service();
        let (token, issued) = jwt.generate_reset_token("leroy@example.com").unwrap();
        let decoded = jwt.decode_reset_token(&token).unwrap();
        assert_eq!(decoded.sub, "leroy@example.com");
        assert_eq!(decoded.random_number, issued.random_number);
        assert_eq!(decoded.exp, issued.exp);
        assert_eq!(decoded.exp - decoded.iat, 5 * 60);
    }

    #[test]
    fn login_tokens_are_not_reset_tokens() {
        let jwt = service();
        let token = jwt.generate_token("leroy", "applicant").unwrap();
        assert!(jwt.decode_reset_token(&token).is_none());
    }
}
