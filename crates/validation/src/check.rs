//! Single-value predicates.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// A predicate over the (already sanitized) text form of a field.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// ASCII digits only, at least one.
    Numeric,

    /// Unicode letters and digits, plus any character in `ignore`.
    Alphanumeric { ignore: &'static str },

    /// Character count within inclusive bounds.
    Length { min: Option<usize>, max: Option<usize> },

    /// Named custom predicate.
    Custom {
        name: &'static str,
        predicate: fn(&str) -> bool,
    },
}

impl Check {
    pub fn length(min: usize, max: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn min_length(min: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: None,
        }
    }

    pub fn max_length(max: usize) -> Self {
        Self::Length {
            min: None,
            max: Some(max),
        }
    }

    pub fn passes(&self, text: &str) -> bool {
        match self {
            Check::Numeric => is_numeric(text),
            Check::Alphanumeric { ignore } => is_alphanumeric(text, ignore),
            Check::Length { min, max } => {
                let len = text.chars().count();
                min.is_none_or(|m| len >= m) && max.is_none_or(|m| len <= m)
            }
            Check::Custom { predicate, .. } => predicate(text),
        }
    }
}

pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_alphanumeric(text: &str, ignore: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || ignore.contains(c))
}

/// At least one ASCII letter and at least one digit.
pub fn has_letter_and_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic()) && text.chars().any(|c| c.is_ascii_digit())
}

pub fn looks_like_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_is_digits_only() {
        assert!(Check::Numeric.passes("2010"));
        assert!(!Check::Numeric.passes(""));
        assert!(!Check::Numeric.passes("-1"));
        assert!(!Check::Numeric.passes("1.5"));
        assert!(!Check::Numeric.passes("20 10"));
    }

    #[test]
    fn alphanumeric_honours_ignore_set() {
        let check = Check::Alphanumeric { ignore: "/. " };
        assert!(check.passes("O Auto da Compadecida"));
        assert!(check.passes("Ação 2/3."));
        assert!(!check.passes("Star Wars: Episode IV"));
        assert!(!check.passes(""));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let check = Check::length(4, 4);
        assert!(check.passes("ação"));
        assert!(!check.passes("açã"));
        assert!(Check::max_length(3).passes(""));
        assert!(!Check::min_length(5).passes("abcd"));
    }

    #[test]
    fn letter_and_digit() {
        assert!(has_letter_and_digit("tt123AB"));
        assert!(!has_letter_and_digit("1234567"));
        assert!(!has_letter_and_digit("abcdefg"));
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("ana@fatec.sp.gov.br"));
        assert!(!looks_like_email("ana@fatec"));
        assert!(!looks_like_email("ana fatec@x.com"));
    }
}
