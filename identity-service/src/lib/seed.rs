use auth::generate_salt;
use auth::PasswordHasher;

use crate::identity::errors::AuthError;
use crate::identity::errors::StoreError;
use crate::identity::models::User;
use crate::identity::models::UserId;
use crate::identity::models::Username;
use crate::identity::ports::CredentialStore;

const SALT_LEN: usize = 24;

/// Development and demo users, created only when absent.
const SEED_USERS: &[(&str, &str, &str)] = &[
    ("0", "admin", "secret"),
    ("1", "chan", "mypassword"),
    ("2", "john", "12345678"),
    ("3", "patel", "patel_rules"),
];

/// Seed well-known users into the store. Idempotent.
pub async fn seed_users(store: &dyn CredentialStore) -> Result<(), AuthError> {
    let hasher = PasswordHasher::new();

    for (id, username, password) in SEED_USERS {
        match store.get_user(id).await {
            Ok(_) => continue,
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(AuthError::Store(e)),
        }

        let salt = generate_salt(SALT_LEN);
        let user = User {
            id: UserId::new(*id)?,
            username: Username::new(*username)?,
            password_hash: hasher.hash(password, &salt),
            salt,
        };

        store.save_user(&user).await.map_err(AuthError::Store)?;
        tracing::info!(user_id = %user.id, username = %user.username, "Seeded user");
    }

    Ok(())
}
