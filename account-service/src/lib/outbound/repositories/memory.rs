use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::ports::AccountRepository;

/// Account store kept in process memory.
///
/// Assigns ids from 1 upward and enforces email uniqueness like the
/// Postgres table does. Used by the test suites and for local runs with
/// `database.url = "memory"`.
#[derive(Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<Accounts>,
}

#[derive(Default)]
struct Accounts {
    last_id: i32,
    by_id: BTreeMap<AccountId, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut accounts = self.inner.write().await;

        if accounts
            .by_id
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        accounts.last_id += 1;
        let account = account.with_id(AccountId(accounts.last_id));
        accounts.by_id.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.inner.read().await.by_id.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .inner
            .read()
            .await
            .by_id
            .values()
            .find(|account| account.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.inner.read().await.by_id.values().cloned().collect())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        self.inner
            .write()
            .await
            .by_id
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }
}
