use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Run `f` inside a fresh transaction: commit on `Ok`, roll back on `Err`.
///
/// ```ignore
/// with_txn(&app_state, |txn| Box::pin(async move {
///     posts_service::create(txn, user_id, input).await
/// })).await
/// ```
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> LocalBoxFuture<'a, Result<R, AppError>>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Keep the original error; a failed rollback is only logged.
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
