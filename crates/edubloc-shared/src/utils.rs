//! Utility functions

pub fn mask_email(email: &str) -> String {
    if let Some((local, domain)) = email.split_once('@') {
        // Keep at most two leading characters, on char boundaries.
        let visible = if local.chars().count() <= 2 { 1 } else { 2 };
        let prefix: String = local.chars().take(visible).collect();
        format!("{}***@{}", prefix, domain)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("parent@example.com"), "pa***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_mask_email_edge_local_parts() {
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("é@example.com"), "é***@example.com");
        assert_eq!(mask_email("éric@example.com"), "ér***@example.com");
    }
}
