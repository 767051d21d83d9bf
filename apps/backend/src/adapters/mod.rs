//! SeaORM adapters. Functions return `DbErr`; repos map it to `DomainError`.

pub mod posts_sea;
pub mod users_sea;
