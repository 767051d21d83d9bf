//! Unique test data built on ULIDs so tests sharing a database never collide.

use ulid::Ulid;

/// A unique username-safe string: `{prefix}_{ulid}` truncated to 50 chars.
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let a = unique_username("alice");
/// let b = unique_username("alice");
/// assert_ne!(a, b);
/// assert!(a.starts_with("alice_"));
/// assert!(a.len() <= 50);
/// ```
pub fn unique_username(prefix: &str) -> String {
    let mut name = format!("{}_{}", prefix, Ulid::new());
    name.truncate(50);
    name
}

/// A unique, lower-case email address: `{prefix}-{ulid}@example.test`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("test");
/// assert!(email.ends_with("@example.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}
