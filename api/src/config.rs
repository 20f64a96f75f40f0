use std::env;

#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection string (API v1)
    pub database_url: String,
    /// MongoDB connection string (API v2)
    pub mongo_url: String,
    pub mongo_database: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            mongo_url: env::var("MONGO_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_database: env::var("MONGO_DATABASE").unwrap_or_else(|_| "geosense".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
