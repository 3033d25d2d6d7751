//! MongoDB implementation of AccountRepository

use async_trait::async_trait;
use mongodb::{Collection, Database, IndexModel, bson::doc};
use tracing::instrument;

use crate::error::AccountResult;
use crate::models::Account;
use crate::repository::AccountRepository;

/// Default collection holding account documents
pub const DEFAULT_COLLECTION: &str = "users";

/// MongoDB implementation of the AccountRepository
pub struct MongoAccountRepository {
    collection: Collection<Account>,
}

impl MongoAccountRepository {
    /// Create a new MongoAccountRepository over the `users` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoAccountRepository::new(client.database("flowx"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a new MongoAccountRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Account>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Account> {
        &self.collection
    }

    /// Create the email lookup index
    pub async fn create_indexes(&self) -> AccountResult<()> {
        let index = IndexModel::builder().keys(doc! { "email": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let account = self.collection.find_one(doc! { "email": email }).await?;
        Ok(account)
    }

    #[instrument(skip(self))]
    async fn exists_by_id(&self, id: &str) -> AccountResult<bool> {
        let count = self.collection.count_documents(doc! { "_id": id }).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, account), fields(account_id = %account.id))]
    async fn save(&self, account: Account) -> AccountResult<Account> {
        let result = self
            .collection
            .replace_one(doc! { "_id": account.id.as_str() }, &account)
            .upsert(true)
            .await?;

        if result.upserted_id.is_some() {
            tracing::info!("Account inserted");
        } else {
            tracing::info!("Account replaced");
        }
        Ok(account)
    }
}
