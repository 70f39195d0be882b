use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, SqlErr,
};

use crate::{
    domain::{
        error::RepositoryError,
        models::user::{StoredUser, UserIdentifier},
        repositories::user_repository::UserRepository,
    },
    infrastructure::entity::users,
};

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn exists(&self, identifier: UserIdentifier<'_>) -> Result<bool, RepositoryError> {
        let condition = match identifier {
            UserIdentifier::Id(id) => users::Column::Id.eq(*id.as_uuid()),
            UserIdentifier::Email(email) => users::Column::Email.eq(email),
            UserIdentifier::Username(username) => users::Column::Username.eq(username),
        };

        let count = users::Entity::find()
            .filter(condition)
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    async fn insert(&self, user: &StoredUser) -> Result<(), RepositoryError> {
        let profile = user.profile();
        let user_model = users::ActiveModel {
            id: Set(*user.id().as_uuid()),
            email: Set(user.email().to_string()),
            username: Set(user.username().to_string()),
            password_hash: Set(user.password_hash().as_str().to_string()),
            dob: Set(user.dob().to_string()),
            first_name: Set(profile.first_name.clone()),
            last_name: Set(profile.last_name.clone()),
            gender: Set(profile.gender.clone()),
            created_at: Set(user.created_at()),
        };

        users::Entity::insert(user_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_insert_error)?;

        Ok(())
    }
}

fn map_insert_error(error: DbErr) -> RepositoryError {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::AlreadyExists(detail),
        _ => RepositoryError::DatabaseError(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::models::{
            credential::HashedPassword,
            registration::{RegistrationRequest, ValidatedRegistration},
            user::Profile,
        },
        infrastructure::database::test_support::memory_database,
    };

    fn stored_user(email: &str, username: &str) -> StoredUser {
        let request = RegistrationRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: "pw123".to_string(),
            dob: "30".to_string(),
            profile: Profile {
                first_name: Some("Ann".to_string()),
                last_name: None,
                gender: Some("f".to_string()),
            },
        };
        StoredUser::new(
            ValidatedRegistration::new(request, 30),
            HashedPassword::new("$argon2id$mock".to_string()),
        )
    }

    #[tokio::test]
    async fn exists_reflects_inserted_user() {
        let repository = SeaOrmUserRepository::new(memory_database().await);

        assert!(!repository.exists(UserIdentifier::Email("ann@x.com")).await.unwrap());
        assert!(!repository.exists(UserIdentifier::Username("ann")).await.unwrap());

        repository.insert(&stored_user("ann@x.com", "ann")).await.unwrap();

        assert!(repository.exists(UserIdentifier::Email("ann@x.com")).await.unwrap());
        assert!(repository.exists(UserIdentifier::Username("ann")).await.unwrap());
        // columns are not interchangeable
        assert!(!repository.exists(UserIdentifier::Email("ann")).await.unwrap());
        assert!(!repository.exists(UserIdentifier::Username("ann@x.com")).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_id_does_not_exist() {
        let repository = SeaOrmUserRepository::new(memory_database().await);
        repository.insert(&stored_user("ann@x.com", "ann")).await.unwrap();

        let other = stored_user("bob@x.com", "bob");
        assert!(!repository.exists(UserIdentifier::Id(*other.id())).await.unwrap());
    }

    #[tokio::test]
    async fn lookups_are_case_sensitive() {
        let repository = SeaOrmUserRepository::new(memory_database().await);
        repository.insert(&stored_user("ann@x.com", "ann")).await.unwrap();

        assert!(!repository.exists(UserIdentifier::Email("ANN@x.com")).await.unwrap());
        assert!(!repository.exists(UserIdentifier::Username("Ann")).await.unwrap());
    }

    #[tokio::test]
    async fn insert_persists_every_field() {
        let db = memory_database().await;
        let repository = SeaOrmUserRepository::new(db.clone());
        let user = stored_user("ann@x.com", "ann");

        repository.insert(&user).await.unwrap();
        assert!(repository.exists(UserIdentifier::Id(*user.id())).await.unwrap());

        let row = users::Entity::find()
            .filter(users::Column::Username.eq("ann"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.id, *user.id().as_uuid());
        assert_eq!(row.email, "ann@x.com");
        assert_eq!(row.password_hash, "$argon2id$mock");
        assert_eq!(row.dob, "30");
        assert_eq!(row.first_name.as_deref(), Some("Ann"));
        assert_eq!(row.last_name, None);
        assert_eq!(row.gender.as_deref(), Some("f"));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_by_the_store() {
        let repository = SeaOrmUserRepository::new(memory_database().await);
        repository.insert(&stored_user("ann@x.com", "ann")).await.unwrap();

        let result = repository.insert(&stored_user("ann@x.com", "bob")).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_by_the_store() {
        let repository = SeaOrmUserRepository::new(memory_database().await);
        repository.insert(&stored_user("ann@x.com", "ann")).await.unwrap();

        let result = repository.insert(&stored_user("other@x.com", "ann")).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists(_))));
        assert_eq!(users::Entity::find().count(&repository.db).await.unwrap(), 1);
    }
}
