use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::{dao::models::NewUserEntity, error::ServiceError, state::SharedState};

/// Create a new account with a freshly salted password hash.
///
/// Presence of the fields has already been validated at the route boundary;
/// this layer owns the uniqueness rule.
pub async fn register(
    state: &SharedState,
    username: String,
    password: String,
) -> Result<(), ServiceError> {
    let password_hash = hash_password(&password)?;
    let new_user = NewUserEntity {
        username,
        password_hash,
    };

    let created = state
        .run_op(move |store| store.create_user(new_user.clone()))
        .await?;

    if created.is_none() {
        return Err(ServiceError::DuplicateUsername);
    }
    Ok(())
}

/// Verify credentials and return the user id on success.
///
/// Unknown usernames and wrong passwords both produce
/// [`ServiceError::InvalidCredentials`] so the response never reveals which
/// half was wrong.
pub async fn login(
    state: &SharedState,
    username: String,
    password: String,
) -> Result<i64, ServiceError> {
    let lookup = username.clone();
    let user = state
        .run_op(move |store| store.find_user_by_username(lookup.clone()))
        .await?;

    let Some(user) = user else {
        return Err(ServiceError::InvalidCredentials);
    };

    if !verify_password(&password, &user.password_hash)? {
        return Err(ServiceError::InvalidCredentials);
    }

    Ok(user.id)
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Internal(format!("failed to hash password: {err}")))
}

/// Constant-time verification against the stored PHC-format hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| ServiceError::Internal(format!("stored hash is malformed: {err}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoragePolicy;
    use crate::state::AppState;

    // With no primary installed, the fallback policy serves every operation
    // from the in-memory store, which is exactly what these tests need.
    fn memory_state() -> SharedState {
        AppState::new(StoragePolicy::Fallback)
    }

    #[tokio::test]
    async fn test_register_then_login_roundtrip() {
        let state = memory_state();
        register(&state, "ona".to_string(), "slaptazodis".to_string())
            .await
            .unwrap();

        let user_id = login(&state, "ona".to_string(), "slaptazodis".to_string())
            .await
            .unwrap();
        assert_eq!(user_id, 1);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let state = memory_state();
        register(&state, "ona".to_string(), "first".to_string())
            .await
            .unwrap();

        let second = register(&state, "ona".to_string(), "second".to_string()).await;
        assert!(matches!(second, Err(ServiceError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let state = memory_state();
        register(&state, "ona".to_string(), "teisingas".to_string())
            .await
            .unwrap();

        let wrong_password = login(&state, "ona".to_string(), "neteisingas".to_string()).await;
        let unknown_user = login(&state, "jonas".to_string(), "teisingas".to_string()).await;
        assert!(matches!(
            wrong_password,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(unknown_user, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_stored_password_is_hashed_and_salted() {
        let state = memory_state();
        register(&state, "ona".to_string(), "slaptazodis".to_string())
            .await
            .unwrap();
        register(&state, "jonas".to_string(), "slaptazodis".to_string())
            .await
            .unwrap();

        let store = state.fallback_store();
        let ona = store
            .find_user_by_username("ona".to_string())
            .await
            .unwrap()
            .unwrap();
        let jonas = store
            .find_user_by_username("jonas".to_string())
            .await
            .unwrap()
            .unwrap();

        assert!(ona.password_hash.starts_with("$argon2"));
        assert_ne!(ona.password_hash, "slaptazodis");
        // Same password, different salts.
        assert_ne!(ona.password_hash, jonas.password_hash);
    }
}
