//! Backend test support utilities
//!
//! Shared by the blog backend's unit and integration tests: logging
//! initialization, problem-details assertions and unique test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
