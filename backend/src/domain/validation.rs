//! Syntax validation for emails and domain names.
//!
//! Pure functions with no I/O; the rest of the domain builds its validated
//! newtypes on top of these.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum accepted length for a domain name.
pub const DOMAIN_NAME_MIN: usize = 3;
/// Maximum accepted length for a domain name.
pub const DOMAIN_NAME_MAX: usize = 255;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static DOMAIN_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("hard-coded email regex must compile")
    })
}

fn domain_regex() -> &'static Regex {
    // Labels allow alphanumerics, hyphen, and underscore; the trailing TLD
    // must be purely alphabetic with at least two letters.
    DOMAIN_RE.get_or_init(|| {
        Regex::new(r"^([a-zA-Z0-9_-]{1,63}\.)+[a-zA-Z]{2,}$")
            .expect("hard-coded domain regex must compile")
    })
}

/// Check whether `candidate` has a plausible `local@domain.tld` shape.
///
/// Case-insensitive; both `User@Example.COM` and `user@example.com` pass.
pub fn is_valid_email(candidate: &str) -> bool {
    email_regex().is_match(candidate)
}

/// Check whether `candidate` is an acceptable custom domain name.
///
/// Accepts 3–255 characters of one-or-more dotted labels followed by an
/// alphabetic TLD of two or more letters. Scheme-prefixed input (`://...`)
/// is rejected outright.
pub fn is_valid_domain_name(candidate: &str) -> bool {
    if candidate.len() < DOMAIN_NAME_MIN || candidate.len() > DOMAIN_NAME_MAX {
        return false;
    }
    if candidate.starts_with("://") {
        return false;
    }
    domain_regex().is_match(candidate)
}
