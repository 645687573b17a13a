use crate::config::PasswordScheme;
use crate::database::CredentialStore;
use crate::models::UserRecord;
use crate::utils::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    AlreadyExists,
}

/// Signup and login rules over the credentials file.
pub struct CredentialService {
    store: CredentialStore,
    scheme: PasswordScheme,
    bcrypt_cost: u32,
}

impl CredentialService {
    pub fn new(store: CredentialStore, scheme: PasswordScheme) -> Self {
        Self {
            store,
            scheme,
            bcrypt_cost: DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Exact, case-sensitive name lookup.
    pub async fn exists(&self, name: &str) -> Result<bool, AppError> {
        let records = self.store.load().await?;
        Ok(records.iter().any(|user| user.name == name))
    }

    /// Appends a record without checking for duplicates; see [`Self::register`].
    pub async fn create(&self, name: &str, password: &str, studies: &str) -> Result<(), AppError> {
        let record = UserRecord::new(name, self.encode_password(password).await?, studies);

        self.store
            .update(move |records| {
                records.push(record);
                (true, ())
            })
            .await
    }

    /// Creates the account unless the name is taken. The check and the
    /// insert happen under one store lock.
    pub async fn register(
        &self,
        name: &str,
        password: &str,
        studies: &str,
    ) -> Result<RegisterOutcome, AppError> {
        let record = UserRecord::new(name, self.encode_password(password).await?, studies);

        self.store
            .update(move |records| {
                if records.iter().any(|user| user.name == record.name) {
                    return (false, RegisterOutcome::AlreadyExists);
                }
                records.push(record);
                (true, RegisterOutcome::Registered)
            })
            .await
    }

    /// First record whose name and password both match.
    pub async fn verify(&self, name: &str, password: &str) -> Result<Option<UserRecord>, AppError> {
        let records = self.store.load().await?;

        match self.scheme {
            PasswordScheme::Plain => Ok(records
                .into_iter()
                .find(|user| user.name == name && user.password == password)),
            PasswordScheme::Bcrypt => {
                for user in records.into_iter().filter(|user| user.name == name) {
                    if Self::check_hash(password.to_string(), user.password.clone()).await? {
                        return Ok(Some(user));
                    }
                }
                Ok(None)
            }
        }
    }

    async fn encode_password(&self, password: &str) -> Result<String, AppError> {
        match self.scheme {
            PasswordScheme::Plain => Ok(password.to_string()),
            PasswordScheme::Bcrypt => {
                let password = password.to_string();
                let cost = self.bcrypt_cost;
                tokio::task::spawn_blocking(move || hash(password, cost))
                    .await
                    .map_err(|e| AppError::HashingError(e.to_string()))?
                    .map_err(AppError::from)
            }
        }
    }

    async fn check_hash(password: String, stored: String) -> Result<bool, AppError> {
        let result = tokio::task::spawn_blocking(move || verify(password, &stored))
            .await
            .map_err(|e| AppError::HashingError(e.to_string()))?;

        match result {
            Ok(valid) => Ok(valid),
            Err(e) => {
                // Legacy clear-text entries end up here.
                log::warn!("⚠️  Stored password is not a bcrypt hash: {}", e);
                Ok(false)
            }
        }
    }
}
