//! Form checks for the document issuance dialog.

/// Accepts `local@domain.tld`: no whitespace, exactly one `@`, a non-empty
/// local part, and a dot inside the domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("teste@gmail.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@clinic.com.br"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("teste"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("teste@gmail"));
        assert!(!is_valid_email("teste@.com"));
        assert!(!is_valid_email("teste@gmail."));
        assert!(!is_valid_email("te ste@gmail.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }
}
