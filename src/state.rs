use ridebook_config::{CorsConfig, DatabaseConfig, JwtConfig};
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Connects to the database using environment configuration.
    pub async fn from_env() -> Result<Self, sqlx::Error> {
        let db = ridebook_db::init_db_pool(&DatabaseConfig::from_env()).await?;
        Ok(Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        })
    }
}
