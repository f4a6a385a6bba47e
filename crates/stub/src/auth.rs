use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use lightbox_core::session::{Credentials, LoginResponse, Role};
use serde::{Deserialize, Serialize};

use crate::config::StubConfig;
use crate::error::ApiError;

/// Token claims. `exp` is seconds since the epoch.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: i64,
}

/// Checks the configured admin account and signs session tokens.
pub struct Authenticator {
    email: String,
    user_id: String,
    password_hash: String,
    signing_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

// Low-cost parameters: this is a development stub, not a credential store.
fn hasher() -> Result<Argon2<'static>, ApiError> {
    let params = Params::new(4096, 2, 1, None).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

impl Authenticator {
    pub fn new(config: &StubConfig) -> Result<Self, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = hasher()?
            .hash_password(config.admin_password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("failed to hash admin password: {e}")))?
            .to_string();
        Ok(Self {
            email: config.admin_email.clone(),
            user_id: config.admin_user_id.clone(),
            password_hash,
            signing_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::seconds(config.session_ttl_secs),
        })
    }

    pub fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        if !credentials.email.eq_ignore_ascii_case(&self.email) || !self.password_matches(&credentials.password)? {
            tracing::info!(email = %credentials.email, "login rejected");
            return Err(ApiError::Unauthorized);
        }

        let expires_at = Utc::now() + self.ttl;
        let claims = Claims {
            sub: self.user_id.clone(),
            role: Role::Admin,
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.signing_key)
            .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))?;

        tracing::info!(user_id = %self.user_id, "login accepted");
        Ok(LoginResponse {
            user_id: self.user_id.clone(),
            role: Role::Admin,
            token: Some(token),
            expires_at: Some(expires_at),
        })
    }

    fn password_matches(&self, password: &str) -> Result<bool, ApiError> {
        let parsed = PasswordHash::new(&self.password_hash).map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(hasher()?.verify_password(password.as_bytes(), &parsed).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn authenticator() -> Authenticator {
        Authenticator::new(&StubConfig::default()).unwrap()
    }

    #[test]
    fn accepts_configured_admin() {
        let auth = authenticator();
        let response = auth
            .login(&Credentials::new("Admin@Studio.local", "admin"))
            .unwrap();
        assert_eq!(response.user_id, "admin");
        assert_eq!(response.role, Role::Admin);

        let token = response.token.unwrap();
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(StubConfig::default().jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp, response.expires_at.unwrap().timestamp());
    }

    #[test]
    fn rejects_wrong_password_or_email() {
        let auth = authenticator();
        assert!(matches!(
            auth.login(&Credentials::new("admin@studio.local", "nope")),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            auth.login(&Credentials::new("someone@studio.local", "admin")),
            Err(ApiError::Unauthorized)
        ));
    }
}
