//! Infrastructure: database bootstrap, state construction, DbErr translation.

pub mod db;
pub mod db_errors;
pub mod state;
