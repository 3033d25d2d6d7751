use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AccountResult;
use crate::models::Account;

/// Record store for accounts.
///
/// Accounts are keyed by `id` and looked up by `email`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find the account registered under an email
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>>;

    /// Check whether an account with this id exists
    async fn exists_by_id(&self, id: &str) -> AccountResult<bool>;

    /// Insert or replace an account by id
    async fn save(&self, account: Account) -> AccountResult<Account>;
}

/// In-memory implementation of AccountRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch an account by id, bypassing the trait (used to inspect state in tests)
    pub async fn get(&self, id: &str) -> Option<Account> {
        self.accounts.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn exists_by_id(&self, id: &str) -> AccountResult<bool> {
        Ok(self.accounts.read().await.contains_key(id))
    }

    async fn save(&self, account: Account) -> AccountResult<Account> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id.clone(), account.clone());

        tracing::debug!(account_id = %account.id, "Saved account");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, email: &str) -> Account {
        Account {
            id: id.to_string(),
            name: "Test User".to_string(),
            address: "1 Main Street".to_string(),
            phone: "0712345678".to_string(),
            division: "Colombo".to_string(),
            division_code: "CMB-01".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find_by_email() {
        let repo = InMemoryAccountRepository::new();
        repo.save(account("ABCDEFGHIJKL", "a@b.com")).await.unwrap();

        let found = repo.find_by_email("a@b.com").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some("ABCDEFGHIJKL".to_string()));

        assert!(repo.find_by_email("other@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_by_id() {
        let repo = InMemoryAccountRepository::new();
        assert!(!repo.exists_by_id("ABCDEFGHIJKL").await.unwrap());

        repo.save(account("ABCDEFGHIJKL", "a@b.com")).await.unwrap();
        assert!(repo.exists_by_id("ABCDEFGHIJKL").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let repo = InMemoryAccountRepository::new();
        repo.save(account("ABCDEFGHIJKL", "a@b.com")).await.unwrap();

        let mut changed = account("ABCDEFGHIJKL", "a@b.com");
        changed.name = "Renamed".to_string();
        repo.save(changed).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.get("ABCDEFGHIJKL").await.unwrap().name, "Renamed");
    }
}
