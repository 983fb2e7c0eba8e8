//! vtiger::accounts
//!
//! Account resolution with a per-process in-memory cache.

use super::{Method, VtigerError};
use crate::core::App;
use crate::model::Account;
use crate::ui::output;

/// Resolve an account by id, consulting the cache first.
///
/// Never fails: a request error or an empty result yields the placeholder
/// account so ticket rendering always has a name to show. Only real
/// accounts are cached; placeholders are re-attempted on the next lookup.
///
/// The cache key is the *requested* id. The service sometimes returns
/// rows under a differently-normalized id; keying by the requested id
/// keeps repeat lookups for the same reference hitting the cache.
pub async fn lookup_account(app: &mut App, account_id: &str) -> Account {
    if account_id.is_empty() {
        return Account::unknown();
    }
    if let Some(hit) = app.accounts.get(account_id) {
        return hit.clone();
    }

    let account = match fetch_account(app, account_id).await {
        Ok(Some(account)) => account,
        Ok(None) => Account::unknown(),
        Err(e) => {
            output::warn(
                format!("account lookup for '{}' failed: {}", account_id, e),
                app.verbosity,
            );
            Account::unknown()
        }
    };

    if !account.is_placeholder() {
        app.accounts
            .insert(account_id.to_string(), account.clone());
    }
    account
}

/// Query the Accounts module for a single id.
async fn fetch_account(app: &mut App, account_id: &str) -> Result<Option<Account>, VtigerError> {
    let query = format!(
        "SELECT {} FROM Accounts WHERE id = '{}';",
        Account::query_fields(),
        account_id
    );
    let response = app
        .client
        .execute(&[("operation", "query"), ("query", &query)], Method::Get)
        .await?;

    if !response.success {
        return Err(response.rejection("query"));
    }

    let rows = response.rows();
    if rows.is_empty() {
        return Ok(None);
    }
    if rows.len() > 1 {
        output::warn(
            format!("more than one account matched '{}'; using the first", account_id),
            app.verbosity,
        );
    }

    Ok(Some(Account::from_row(&rows[0])))
}
