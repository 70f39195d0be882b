use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema,
};

use crate::{config::DatabaseConfig, infrastructure::entity::users};

/// Open the account store described by `config`
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(config.timeout)
        .acquire_timeout(config.timeout)
        .sqlx_logging(config.sql_logging);

    Database::connect(opt).await
}

/// Create the `users` table, with its unique email and username columns, if it is missing
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(users::Entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let db = test_support::memory_database().await;
        ensure_schema(&db).await.unwrap();
    }
}
