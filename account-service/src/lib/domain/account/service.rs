use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::NewAccount;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
/// Argon2 work is moved onto tokio's blocking pool.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

async fn run_blocking<F, T>(task: F) -> Result<T, AccountError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AccountError::Unknown(format!("Blocking task failed: {}", e)))
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        if command.password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = run_blocking(move || authenticator.hash_password(&password)).await??;

        let account = NewAccount::open(
            command.first_name,
            command.last_name,
            command.email,
            password_hash,
        );

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, "Account created");

        Ok(created)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.delete(id).await?;
        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError> {
        let account = match self.repository.find_by_email(&command.email).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::debug!("Login attempt for unknown email");
                let authenticator = Arc::clone(&self.authenticator);
                let password = command.password;
                if let Err(e) = run_blocking(move || authenticator.verify_dummy(&password)).await? {
                    tracing::error!(error = %e, "Dummy password verification failed");
                }
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(error = %e, "Account lookup failed during login");
                return Err(e);
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let stored_hash = account.password_hash.clone();
        let subject = account.id;
        let email = account.email.as_str().to_string();

        let result = run_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, subject, &email)
        })
        .await?
        .map_err(|e| {
            tracing::debug!(account_id = %subject, error = %e, "Login rejected");
            AccountError::from(e)
        })?;

        tracing::info!(account_id = %account.id, "Access token issued");

        Ok(LoginOutcome {
            account,
            token: result.access_token,
        })
    }
}
