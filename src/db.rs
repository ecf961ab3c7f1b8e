use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// Masks the password section of a connection URL before it is logged.
fn redact_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, tail)) = rest.split_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, tail),
        None => format!("{}://{}@{}", scheme, credentials, tail),
    }
}

pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let url = env::var("DATABASE_URL")
        .map_err(|_| DbErr::Custom("DATABASE_URL is not set".to_string()))?;
    tracing::info!(url = %redact_db_url(&url), "connecting to database");
    Database::connect(url).await
}
