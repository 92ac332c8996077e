use super::error::AuthError;
use super::models::{Admin, Claims, IssuedToken};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Issues and verifies HS256 admin tokens. Logged-out tokens are remembered
/// by `jti` until they would have expired anyway.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    revoked: Cache<String, ()>,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            revoked: Cache::builder().time_to_live(ttl).build(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, admin: &Admin) -> Result<IssuedToken, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: admin.id.clone(),
            username: admin.username.clone(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl.as_secs(),
            claims,
        })
    }

    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("JWT validation failed: {}", e);
                AuthError::InvalidToken
            })?
            .claims;

        if self.revoked.contains_key(&claims.jti) {
            return Err(AuthError::TokenRevoked);
        }

        Ok(claims)
    }

    pub async fn revoke(&self, claims: &Claims) {
        self.revoked.insert(claims.jti.clone(), ()).await;
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let mut parts = auth_header.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Admin {
        Admin::new("curator".to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_issue_and_verify() {
        let service = TokenService::new("secret", Duration::from_secs(3600));
        let admin = admin();
        let issued = service.issue(&admin).unwrap();

        assert_eq!(issued.expires_in, 3600);
        let claims = service.verify(&issued.token).await.unwrap();
        assert_eq!(claims.sub, admin.id);
        assert_eq!(claims.username, "curator");
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let issuer = TokenService::new("secret-a", Duration::from_secs(3600));
        let verifier = TokenService::new("secret-b", Duration::from_secs(3600));
        let issued = issuer.issue(&admin()).unwrap();

        let result = verifier.verify(&issued.token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
        assert!(matches!(
            verifier.verify("garbage").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() {
        let service = TokenService::new("secret", Duration::from_secs(3600));
        let issued = service.issue(&admin()).unwrap();

        service.revoke(&issued.claims).await;
        let result = service.verify(&issued.token).await;
        assert!(matches!(result, Err(AuthError::TokenRevoked)));

        // A second token for the same admin is unaffected.
        let other = service.issue(&admin()).unwrap();
        assert!(service.verify(&other.token).await.is_ok());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token("Bearer a b"), None);
    }
}
