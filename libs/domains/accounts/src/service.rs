//! Account Service - sign-in, sign-up and profile update

use std::sync::Arc;
use tracing::instrument;

use crate::error::AccountResult;
use crate::models::{AccountUpdate, AuthOutcome, NewAccount};
use crate::repository::AccountRepository;

/// Account service providing the sign-in, sign-up and update operations
///
/// Each operation makes at most one read and one write against the
/// repository. Validation failures come back as [`AuthOutcome`] values;
/// only repository faults are returned as errors.
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new AccountService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a service that shares an existing repository handle
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Check an email/password pair against the stored account.
    ///
    /// Passwords are stored and compared as plain text.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> AccountResult<AuthOutcome> {
        let outcome = match self.repository.find_by_email(email).await? {
            None => AuthOutcome::NotFound {
                email: email.to_string(),
            },
            Some(account) if account.password == password => AuthOutcome::SignedIn {
                email: email.to_string(),
            },
            Some(_) => AuthOutcome::IncorrectPassword,
        };

        tracing::info!(outcome = %outcome.kind(), "Sign-in processed");
        Ok(outcome)
    }

    /// Register a new account.
    ///
    /// Checks run in a fixed order and stop at the first failure: id
    /// uniqueness, then field presence and lengths, then password
    /// confirmation, then the email. Nothing is persisted unless every
    /// check passes.
    #[instrument(skip(self, candidate), fields(email = ?candidate.email))]
    pub async fn sign_up(&self, candidate: NewAccount) -> AccountResult<AuthOutcome> {
        // Duplicate check is keyed by id, but reported against the email.
        if let Some(id) = candidate.id.as_deref() {
            if self.repository.exists_by_id(id).await? {
                tracing::info!(outcome = "already_exists", "Sign-up rejected");
                return Ok(AuthOutcome::AlreadyExists {
                    email: candidate.email.unwrap_or_else(|| "null".to_string()),
                });
            }
        }

        let account = match candidate.into_account() {
            Ok(account) => account,
            Err(reason) => {
                tracing::info!(reason = ?reason, "Sign-up rejected");
                return Ok(reason.into());
            }
        };

        let email = account.email.clone();
        self.repository.save(account).await?;

        tracing::info!("Account signed up");
        Ok(AuthOutcome::SignedUp { email })
    }

    /// Apply a partial update to the account registered under `email`.
    ///
    /// Profile fields are overwritten without re-validation. A password
    /// change requires a matching confirmation; on mismatch the whole
    /// update is dropped and nothing is written.
    #[instrument(skip(self, update))]
    pub async fn update(&self, email: &str, update: AccountUpdate) -> AccountResult<AuthOutcome> {
        let Some(mut account) = self.repository.find_by_email(email).await? else {
            tracing::info!(outcome = "not_found", "Update rejected");
            return Ok(AuthOutcome::NotFound {
                email: email.to_string(),
            });
        };

        if let Err(reason) = account.apply_update(update) {
            tracing::info!(reason = ?reason, "Update rejected");
            return Ok(reason.into());
        }

        self.repository.save(account).await?;

        tracing::info!("Account updated");
        Ok(AuthOutcome::Updated {
            email: email.to_string(),
        })
    }
}

impl<R: AccountRepository> Clone for AccountService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountError;
    use crate::models::{Account, OutcomeKind, Rejection};
    use crate::repository::{InMemoryAccountRepository, MockAccountRepository};

    const EMAIL: &str = "a@b.com";
    const ID: &str = "ABCDEFGHIJKL";

    fn candidate() -> NewAccount {
        NewAccount {
            id: Some(ID.to_string()),
            name: Some("Nimal Perera".to_string()),
            address: Some("12 Lake Road".to_string()),
            phone: Some("0712345678".to_string()),
            division: Some("Kaduwela".to_string()),
            division_code: Some("KD-04".to_string()),
            email: Some(EMAIL.to_string()),
            password: Some("secret".to_string()),
            confirm_password: Some("secret".to_string()),
        }
    }

    fn stored() -> Account {
        candidate().into_account().unwrap()
    }

    async fn seeded() -> (AccountService<InMemoryAccountRepository>, Arc<InMemoryAccountRepository>) {
        let repo = Arc::new(InMemoryAccountRepository::new());
        repo.save(stored()).await.unwrap();
        (AccountService::from_shared(Arc::clone(&repo)), repo)
    }

    /// Mock that reports no existing id and fails the test if save is called
    fn rejecting_repo() -> MockAccountRepository {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(false));
        mock_repo.expect_save().never();
        mock_repo
    }

    #[tokio::test]
    async fn test_sign_up_missing_fields_never_save() {
        let cases: Vec<(NewAccount, Rejection)> = vec![
            (NewAccount { id: None, ..candidate() }, Rejection::MissingId),
            (NewAccount { name: None, ..candidate() }, Rejection::MissingName),
            (NewAccount { address: None, ..candidate() }, Rejection::MissingAddress),
            (NewAccount { phone: None, ..candidate() }, Rejection::MissingPhone),
            (NewAccount { division: None, ..candidate() }, Rejection::MissingDivision),
            (
                NewAccount { division_code: None, ..candidate() },
                Rejection::MissingDivisionCode,
            ),
            (NewAccount { password: None, ..candidate() }, Rejection::MissingPassword),
        ];

        for (input, expected) in cases {
            let service = AccountService::new(rejecting_repo());
            let outcome = service.sign_up(input).await.unwrap();
            assert_eq!(outcome, AuthOutcome::Rejected(expected));
        }
    }

    #[tokio::test]
    async fn test_sign_up_short_id_rejected_before_phone() {
        let service = AccountService::new(rejecting_repo());
        let input = NewAccount {
            id: Some("short".to_string()),
            phone: None,
            division: None,
            ..candidate()
        };

        let outcome = service.sign_up(input).await.unwrap();
        assert_eq!(outcome.to_string(), "User id must be 12 characters long.");
    }

    #[tokio::test]
    async fn test_sign_up_phone_length() {
        let service = AccountService::new(rejecting_repo());
        let input = NewAccount {
            phone: Some("071234".to_string()),
            ..candidate()
        };

        let outcome = service.sign_up(input).await.unwrap();
        assert_eq!(outcome.to_string(), "User phone must be 10 characters long.");
    }

    #[tokio::test]
    async fn test_sign_up_password_mismatch_not_persisted() {
        let service = AccountService::new(rejecting_repo());
        let input = NewAccount {
            confirm_password: Some("different".to_string()),
            ..candidate()
        };

        let outcome = service.sign_up(input).await.unwrap();
        assert_eq!(
            outcome.to_string(),
            "User password and confirm password do not match."
        );
    }

    #[tokio::test]
    async fn test_sign_up_valid_persists() {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let service = AccountService::from_shared(Arc::clone(&repo));

        let outcome = service.sign_up(candidate()).await.unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::SignedUp);
        assert!(outcome.to_string().contains(EMAIL));
        let saved = repo.get(ID).await.unwrap();
        assert_eq!(saved.email, EMAIL);
        assert_eq!(saved.phone, "0712345678");
    }

    #[tokio::test]
    async fn test_sign_up_existing_id_reports_email() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo
            .expect_exists_by_id()
            .with(mockall::predicate::eq(ID))
            .returning(|_| Ok(true));
        mock_repo.expect_save().never();

        let service = AccountService::new(mock_repo);
        let input = NewAccount {
            email: Some("new@b.com".to_string()),
            ..candidate()
        };

        let outcome = service.sign_up(input).await.unwrap();
        assert_eq!(outcome.to_string(), "User with email new@b.com already exists.");
    }

    #[tokio::test]
    async fn test_sign_up_existing_id_without_email() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(true));
        mock_repo.expect_save().never();

        let service = AccountService::new(mock_repo);
        let outcome = service
            .sign_up(NewAccount { email: None, ..candidate() })
            .await
            .unwrap();
        assert_eq!(outcome.to_string(), "User with email null already exists.");
    }

    #[tokio::test]
    async fn test_sign_up_existing_id_checked_before_fields() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(true));
        mock_repo.expect_save().never();

        let service = AccountService::new(mock_repo);
        let input = NewAccount {
            name: None,
            ..candidate()
        };

        let outcome = service.sign_up(input).await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::AlreadyExists);
    }

    #[tokio::test]
    async fn test_sign_up_missing_id_skips_existence_check() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo.expect_exists_by_id().never();
        mock_repo.expect_save().never();

        let service = AccountService::new(mock_repo);
        let outcome = service
            .sign_up(NewAccount { id: None, ..candidate() })
            .await
            .unwrap();
        assert_eq!(outcome.to_string(), "User id cannot be null.");
    }

    #[tokio::test]
    async fn test_sign_up_missing_email_follows_field_order() {
        let cases: Vec<(NewAccount, &str)> = vec![
            (
                NewAccount { id: None, email: None, ..candidate() },
                "User id cannot be null.",
            ),
            (
                NewAccount {
                    phone: Some("071".to_string()),
                    email: None,
                    ..candidate()
                },
                "User phone must be 10 characters long.",
            ),
            (
                NewAccount { email: None, ..candidate() },
                "User email cannot be null.",
            ),
        ];

        for (input, expected) in cases {
            let service = AccountService::new(rejecting_repo());
            let outcome = service.sign_up(input).await.unwrap();
            assert_eq!(outcome.to_string(), expected);
        }
    }

    #[tokio::test]
    async fn test_sign_up_store_fault_propagates() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo
            .expect_exists_by_id()
            .returning(|_| Err(AccountError::Database("connection refused".to_string())));

        let service = AccountService::new(mock_repo);
        let result = service.sign_up(candidate()).await;
        assert!(matches!(result, Err(AccountError::Database(_))));
    }

    #[tokio::test]
    async fn test_sign_in_outcomes() {
        let (service, _repo) = seeded().await;

        let ok = service.sign_in(EMAIL, "secret").await.unwrap();
        assert_eq!(ok.to_string(), "User with email a@b.com signed in successfully.");

        let wrong = service.sign_in(EMAIL, "nope").await.unwrap();
        assert_eq!(wrong, AuthOutcome::IncorrectPassword);
        assert_eq!(wrong.to_string(), "Incorrect password.");

        let missing = service.sign_in("x@b.com", "secret").await.unwrap();
        assert_eq!(missing.to_string(), "User with email x@b.com not found.");
    }

    #[tokio::test]
    async fn test_update_only_name() {
        let (service, repo) = seeded().await;
        let update = AccountUpdate {
            name: Some("Kamal Silva".to_string()),
            ..Default::default()
        };

        let outcome = service.update(EMAIL, update).await.unwrap();
        assert_eq!(outcome.to_string(), "User with email a@b.com updated successfully.");

        let saved = repo.get(ID).await.unwrap();
        assert_eq!(
            saved,
            Account {
                name: "Kamal Silva".to_string(),
                ..stored()
            }
        );
    }

    #[tokio::test]
    async fn test_update_password_mismatch_leaves_record_unchanged() {
        let (service, repo) = seeded().await;
        let update = AccountUpdate {
            name: Some("Kamal Silva".to_string()),
            password: Some("new-secret".to_string()),
            confirm_password: Some("other".to_string()),
            ..Default::default()
        };

        let outcome = service.update(EMAIL, update).await.unwrap();
        assert_eq!(outcome, AuthOutcome::Rejected(Rejection::PasswordMismatch));
        assert_eq!(repo.get(ID).await.unwrap(), stored());
    }

    #[tokio::test]
    async fn test_update_password_change() {
        let (service, repo) = seeded().await;
        let update = AccountUpdate {
            password: Some("new-secret".to_string()),
            confirm_password: Some("new-secret".to_string()),
            ..Default::default()
        };

        service.update(EMAIL, update).await.unwrap();
        assert_eq!(repo.get(ID).await.unwrap().password, "new-secret");
        assert_eq!(
            service.sign_in(EMAIL, "new-secret").await.unwrap().kind(),
            OutcomeKind::SignedIn
        );
    }

    #[tokio::test]
    async fn test_update_unknown_email_never_saves() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = AccountService::new(mock_repo);
        let outcome = service
            .update("x@b.com", AccountUpdate::default())
            .await
            .unwrap();
        assert_eq!(outcome.to_string(), "User with email x@b.com not found.");
    }

    #[tokio::test]
    async fn test_update_save_fault_propagates() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo
            .expect_find_by_email()
            .with(mockall::predicate::eq(EMAIL))
            .returning(|_| Ok(Some(stored())));
        mock_repo
            .expect_save()
            .times(1)
            .returning(|_| Err(AccountError::Database("write conflict".to_string())));

        let service = AccountService::new(mock_repo);
        let update = AccountUpdate {
            name: Some("Kamal Silva".to_string()),
            ..Default::default()
        };

        let result = service.update(EMAIL, update).await;
        assert!(matches!(result, Err(AccountError::Database(msg)) if msg == "write conflict"));
    }

    #[tokio::test]
    async fn test_update_lookup_fault_skips_save() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Err(AccountError::Database("connection refused".to_string())));
        mock_repo.expect_save().never();

        let service = AccountService::new(mock_repo);
        let result = service.update(EMAIL, AccountUpdate::default()).await;
        assert!(matches!(result, Err(AccountError::Database(_))));
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let (service, repo) = seeded().await;
        let update = AccountUpdate {
            address: Some("3 Temple Road".to_string()),
            division: Some("Maharagama".to_string()),
            ..Default::default()
        };

        service.update(EMAIL, update.clone()).await.unwrap();
        let after_first = repo.get(ID).await.unwrap();
        service.update(EMAIL, update).await.unwrap();
        let after_second = repo.get(ID).await.unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.address, "3 Temple Road");
    }
}
