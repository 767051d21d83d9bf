pub mod posts;
pub mod users;
pub mod with_txn;
