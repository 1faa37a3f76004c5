//! Owner-only access checks.

/// Whether the authenticated caller owns the resource.
///
/// Emails are compared exactly as stored. An absent caller or an absent owner
/// never matches.
pub fn authorize_self_service(principal_email: Option<&str>, owner_email: Option<&str>) -> bool {
    match (principal_email, owner_email) {
        (Some(principal), Some(owner)) => principal == owner,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_email_is_authorized() {
        assert!(authorize_self_service(Some("alice@x.io"), Some("alice@x.io")));
    }

    #[test]
    fn test_other_email_is_refused() {
        assert!(!authorize_self_service(Some("alice@x.io"), Some("bob@x.io")));
        assert!(!authorize_self_service(Some("alice@x.io"), Some("Alice@x.io")));
    }

    #[test]
    fn test_absent_side_is_refused() {
        assert!(!authorize_self_service(None, Some("alice@x.io")));
        assert!(!authorize_self_service(Some("alice@x.io"), None));
        assert!(!authorize_self_service(None, None));
    }
}
