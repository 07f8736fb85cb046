// src/utils.rs
use regex::Regex;
use sha2::{Digest, Sha256};
use std::num::IntErrorKind;
use std::sync::OnceLock;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

/// Count ASCII digits in a string
pub fn digit_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Strict email format check, stricter than the conversational step check
pub fn validate_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Strict phone check: 10 to 15 digits (international numbers)
pub fn validate_phone(phone: &str) -> bool {
    (10..=15).contains(&digit_count(phone))
}

/// Normalize a comma separated tech stack: trimmed, lowercase, no empties, no duplicates.
/// First occurrence wins so the result is deterministic.
pub fn parse_tech_stack(tech_stack: &str) -> Vec<String> {
    let mut techs: Vec<String> = Vec::new();
    for tech in tech_stack.split(',') {
        let tech = tech.trim().to_lowercase();
        if !tech.is_empty() && !techs.contains(&tech) {
            techs.push(tech);
        }
    }
    techs
}

/// One-way digest for sensitive fields before storage
pub fn hash_sensitive_data(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}

/// Keep the first 3 characters of the local part
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(3).collect();
            format!("{}...@{}", visible, domain)
        }
        None => "***".to_string(),
    }
}

/// Keep the last 4 digits
pub fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("****-****-{}", tail)
}

/// Map a free-text years-of-experience answer to a level.
/// All digits are concatenated before parsing ("3.5 years" reads as 35);
/// a number too large to parse is still senior.
pub fn experience_level(years: &str) -> &'static str {
    let digits: String = years.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(n) if n < 2 => "junior",
        Ok(n) if n < 5 => "mid-level",
        Ok(_) => "senior",
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => "senior",
        Err(_) => "mid-level",
    }
}
