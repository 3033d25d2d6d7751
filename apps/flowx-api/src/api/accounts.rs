//! Accounts API routes
//!
//! Wires the accounts domain to its MongoDB collection.

use axum::Router;
use domain_accounts::{AccountService, MongoAccountRepository, handlers};
use tracing::info;

use crate::state::AppState;

fn repository(state: &AppState) -> MongoAccountRepository {
    MongoAccountRepository::with_collection(state.db.clone(), &state.config.accounts_collection)
}

/// Create the accounts router
pub fn router(state: &AppState) -> Router {
    handlers::router(AccountService::new(repository(state)))
}

/// Initialize account indexes in MongoDB
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create account indexes: {}", e))?;
    info!(
        collection = %state.config.accounts_collection,
        "Account collection indexes created"
    );
    Ok(())
}
