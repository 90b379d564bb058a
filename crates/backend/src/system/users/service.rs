use anyhow::Result;
use chrono::Utc;
use contracts::system::auth::SignupRequest;
use sea_orm::{DbErr, SqlErr};

use super::{repository, User};
use crate::system::auth::{password, AuthError};

/// Register a new account
pub async fn signup(request: SignupRequest) -> Result<User, AuthError> {
    let username = request.username.trim().to_string();
    let email = request.email.trim().to_string();

    validate_signup(&username, &email, &request.password)?;

    if repository::exists_with_username_or_email(&username, &email).await? {
        return Err(AuthError::AlreadyExists);
    }

    let password_hash = password::hash_password(&request.password)?;

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username,
        email,
        created_at: Utc::now().to_rfc3339(),
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash)
        .await
        .map_err(map_insert_error)?;
    tracing::info!("Registered user '{}'", user.username);

    Ok(user)
}

/// A concurrent signup can pass the existence check and still lose the
/// insert on the UNIQUE constraints.
fn map_insert_error(err: anyhow::Error) -> AuthError {
    let unique_violation = matches!(
        err.downcast_ref::<DbErr>().and_then(DbErr::sql_err),
        Some(SqlErr::UniqueConstraintViolation(_))
    );
    if unique_violation {
        AuthError::AlreadyExists
    } else {
        AuthError::Internal(err)
    }
}

pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), AuthError> {
    if username.is_empty() {
        return Err(AuthError::Validation("Username cannot be empty".into()));
    }
    if !email.contains('@') {
        return Err(AuthError::Validation("Invalid email format".into()));
    }
    password::validate_password_strength(password)
        .map_err(|e| AuthError::Validation(e.to_string()))
}

/// Verify credentials; `None` when the user is unknown or the password does not match
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = repository::get_by_username(username.trim()).await? else {
        return Ok(None);
    };

    let Some(hash) = repository::get_password_hash(&user.id).await? else {
        return Ok(None);
    };

    if !password::verify_password(password, &hash)? {
        return Ok(None);
    }

    let now = Utc::now().to_rfc3339();
    repository::update_last_login(&user.id, &now).await?;

    Ok(Some(User {
        last_login_at: Some(now),
        ..user
    }))
}

/// Get user by ID
pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;
    use crate::system::initialization::apply_auth_migration;

    #[test]
    fn test_validate_signup() {
        assert!(validate_signup("alice", "alice@example.com", "secret1").is_ok());
        assert!(matches!(
            validate_signup("", "alice@example.com", "secret1"),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            validate_signup("alice", "alice.example.com", "secret1"),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            validate_signup("alice", "alice@example.com", "123"),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_other_insert_errors_stay_internal() {
        let err = anyhow::anyhow!("disk I/O error");
        assert!(matches!(map_insert_error(err), AuthError::Internal(_)));
    }

    #[tokio::test]
    async fn test_losing_insert_race_maps_to_already_exists() {
        let db_path = std::env::temp_dir().join(format!(
            "symptom_checker_users_{}.db",
            uuid::Uuid::new_v4()
        ));
        initialize_database(Some(&db_path.to_string_lossy()))
            .await
            .unwrap();
        apply_auth_migration().await.unwrap();

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            created_at: Utc::now().to_rfc3339(),
            last_login_at: None,
        };
        repository::create_with_password(&user, "hash").await.unwrap();

        // Same username, inserted after the existence check already passed
        let twin = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: "alice2@example.com".into(),
            ..user.clone()
        };
        let err = repository::create_with_password(&twin, "hash")
            .await
            .unwrap_err();

        let mapped = map_insert_error(err);
        assert!(matches!(mapped, AuthError::AlreadyExists));
        assert_eq!(mapped.status(), axum::http::StatusCode::CONFLICT);

        let _ = std::fs::remove_file(&db_path);
    }
}
