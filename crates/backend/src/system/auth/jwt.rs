use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::shared::config::JwtConfig;
use crate::system::users::store::UserRecord;

/// Подписывает и проверяет access-токены (HS256, общий секрет)
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Ошибка, если секрет не задан; без него сервер не стартует
    pub fn from_config(config: &JwtConfig) -> Result<Self> {
        let secret = config
            .secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .context("JWT secret is not configured: set [jwt] secret or JWT_SECRET")?;

        Ok(Self::new(
            secret,
            &config.issuer,
            &config.audience,
            config.expiration_minutes,
        ))
    }

    pub fn new(secret: &str, issuer: &str, audience: &str, expiration_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            lifetime: Duration::minutes(expiration_minutes),
        }
    }

    /// Claims для `user` на момент `now`, новый id токена на каждый вызов
    pub fn claims_for(&self, user: &UserRecord, roles: &[String], now: DateTime<Utc>) -> TokenClaims {
        TokenClaims {
            sub: user.username.clone(),
            email: user.email.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
            nameid: user.id.clone(),
            name: user.username.clone(),
            roles: roles.to_vec(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: (now + self.lifetime).timestamp().max(0) as usize,
            iat: now.timestamp().max(0) as usize,
        }
    }

    /// Выдаёт токен уже проверенной активной учётной записи
    pub fn issue(&self, user: &UserRecord, roles: &[String]) -> Result<String> {
        let claims = self.claims_for(user, roles, Utc::now());
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("Failed to encode JWT token")
    }

    /// Проверка JWT токена и извлечение claims
    pub fn validate(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);

        let token_data = decode::<TokenClaims>(token, &self.decoding, &validation)
            .context("Failed to decode JWT token")?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: "3f1c".to_string(),
            username: "karim".to_string(),
            email: Some("karim@example.com".to_string()),
            first_name: None,
            last_name: None,
            email_confirmed: true,
            password_hash: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("unit-test-secret-with-enough-length", "PackhouseApi", "PackhouseClient", 60)
    }

    #[test]
    fn missing_secret_is_fatal() {
        assert!(TokenIssuer::from_config(&JwtConfig::default()).is_err());
        let blank = JwtConfig {
            secret: Some("  ".to_string()),
            ..JwtConfig::default()
        };
        assert!(TokenIssuer::from_config(&blank).is_err());
    }

    #[test]
    fn same_instant_yields_distinct_ids_and_same_roles() {
        let issuer = issuer();
        let roles = vec!["Admin".to_string(), "super-user".to_string()];
        let now = Utc::now();

        let a = issuer.claims_for(&user(), &roles, now);
        let b = issuer.claims_for(&user(), &roles, now);

        assert_ne!(a.jti, b.jti);
        assert_eq!(a.roles, b.roles);
        assert_eq!(a.exp, b.exp);
        assert_eq!(a.exp - a.iat, 60 * 60);
    }

    #[test]
    fn issued_token_round_trips_through_validation() {
        let issuer = issuer();
        let token = issuer.issue(&user(), &["Manager".to_string()]).unwrap();
        let claims = issuer.validate(&token).unwrap();

        assert_eq!(claims.sub, "karim");
        assert_eq!(claims.nameid, "3f1c");
        assert!(claims.has_role("Manager"));
        assert!(!claims.has_role("manager"));
    }

    #[test]
    fn token_from_another_audience_is_rejected() {
        let other = TokenIssuer::new("unit-test-secret-with-enough-length", "PackhouseApi", "Elsewhere", 60);
        let token = other.issue(&user(), &[]).unwrap();
        assert!(issuer().validate(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let short = TokenIssuer::new("unit-test-secret-with-enough-length", "PackhouseApi", "PackhouseClient", -10);
        let token = short.issue(&user(), &[]).unwrap();
        assert!(short.validate(&token).is_err());
    }
}
