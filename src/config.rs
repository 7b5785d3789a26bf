use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Process-wide session signing secret. Strength is validated by
    /// the issuer at startup, not here.
    pub session_jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self, crate::error::AppError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| crate::error::AppError::Config("DATABASE_URL missing".into()))?;
        let session_jwt_secret = env::var("SESSION_JWT_SECRET")
            .map_err(|_| crate::error::AppError::Config("SESSION_JWT_SECRET missing".into()))?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Ok(Self {
            host,
            port,
            database_url,
            session_jwt_secret,
        })
    }

    #[cfg(test)]
    pub fn test_defaults() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            database_url: "postgres://localhost/test".into(),
            session_jwt_secret: "y9K$mP2vRx#TnZ@s4Yw!cGf7Dh&e3Xa6Wq8Lj5BtNu1Zp0MkYhVgCxFbAsSdQwEr"
                .into(),
        }
    }
}
