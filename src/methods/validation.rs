use regex::Regex;

pub fn is_valid_email(email: &str) -> bool {
    // RFC 5321 length limit
    if email.len() > 254 {
        return false;
    }
    lazy_static::lazy_static! {
        static ref EMAIL_REGEX: Regex = Regex::new(
            r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+(?:\.[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+)+$"
        ).expect("Invalid regex");
    }
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone_number(phone: &str) -> bool {
    lazy_static::lazy_static! {
        static ref PHONE_REGEX: Regex = Regex::new(
            r"^\d{10}$"  // Exactly 10 digits
        ).expect("Invalid phone number regex");
    }
    PHONE_REGEX.is_match(phone)
}

pub fn is_valid_zip_code(zip: &str) -> bool {
    lazy_static::lazy_static! {
        static ref ZIP_REGEX: Regex = Regex::new(
            r"^\d{5}(-\d{4})?$"
        ).expect("Invalid zip regex");
    }
    ZIP_REGEX.is_match(zip)
}

// Slugs become public booking URLs and are immutable once created.
pub fn is_valid_slug(slug: &str) -> bool {
    lazy_static::lazy_static! {
        static ref SLUG_REGEX: Regex = Regex::new(
            r"^[a-z0-9](?:[a-z0-9-]{0,62}[a-z0-9])?$"
        ).expect("Invalid slug regex");
    }
    SLUG_REGEX.is_match(slug)
}

pub fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
}

pub fn is_valid_hex_color(color: &str) -> bool {
    lazy_static::lazy_static! {
        static ref COLOR_REGEX: Regex = Regex::new(
            r"^#[0-9a-fA-F]{6}$"
        ).expect("Invalid color regex");
    }
    COLOR_REGEX.is_match(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(&format!("{}@example.com", "x".repeat(250))));
    }

    #[test]
    fn phone_is_ten_digits() {
        assert!(is_valid_phone_number("6145551234"));
        assert!(!is_valid_phone_number("614-555-1234"));
        assert!(!is_valid_phone_number("61455512"));
    }

    #[test]
    fn zip_accepts_plus_four() {
        assert!(is_valid_zip_code("43004"));
        assert!(is_valid_zip_code("43004-1234"));
        assert!(!is_valid_zip_code("4300"));
        assert!(!is_valid_zip_code("43004-12"));
    }

    #[test]
    fn slug_shape() {
        assert!(is_valid_slug("acme-dumpsters"));
        assert!(is_valid_slug("a1"));
        assert!(!is_valid_slug("Acme"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("has space"));
    }

    #[test]
    fn password_minimum_length() {
        assert!(is_valid_password("longenough"));
        assert!(!is_valid_password("short"));
    }

    #[test]
    fn hex_color() {
        assert!(is_valid_hex_color("#00AA44"));
        assert!(!is_valid_hex_color("00AA44"));
        assert!(!is_valid_hex_color("#00AA4"));
    }
}
