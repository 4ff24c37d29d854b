use crate::error::{AppError, AppResult};
use crate::models::UserProfile;
use crate::store::{keys, StoreBackend};

pub struct UserService;

impl UserService {
    /// Mirror the identity provider's profile fields into the user hash.
    /// Runs on every sign-in; overwriting with the same values is fine.
    pub async fn upsert_profile(store: &dyn StoreBackend, profile: &UserProfile) -> AppResult<()> {
        if profile.id.trim().is_empty() {
            return Err(AppError::BadRequest("user id must not be empty".into()));
        }
        if profile.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        store
            .hash_write(&keys::user_key(&profile.id), &profile.to_fields())
            .await?;
        Ok(())
    }

    pub async fn get_profile(store: &dyn StoreBackend, user_id: &str) -> AppResult<UserProfile> {
        let fields = store.hash_read(&keys::user_key(user_id)).await?;
        if fields.is_empty() {
            return Err(AppError::NotFound);
        }
        Ok(UserProfile::from_hash(user_id, &fields)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    #[tokio::test]
    async fn profile_round_trip() {
        let store = MemoryBackend::new();
        let profile = UserProfile {
            id: "kp_42".into(),
            name: "Alice".into(),
            image: String::new(),
            email: Some("alice@example.com".into()),
        };
        UserService::upsert_profile(&store, &profile).await.unwrap();
        let back = UserService::get_profile(&store, "kp_42").await.unwrap();
        assert_eq!(back.name, "Alice");
        assert_eq!(back.email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = MemoryBackend::new();
        let err = UserService::get_profile(&store, "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
