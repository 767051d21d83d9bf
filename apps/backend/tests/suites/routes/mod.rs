pub mod healthcheck;
pub mod users;
