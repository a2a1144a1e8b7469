//! Visit display labels.
//!
//! A label rule is an optional alphabetic prefix followed by the number
//! assigned to the first visit: `V1` labels visits `V1, V2, ...`; `C3`
//! labels them `C3, C4, ...`. Anything else falls back to `Visit <n>`.

/// Label for one visit under the given rule.
pub fn visit_label(rule: Option<&str>, visit_number: u32) -> String {
    let fallback = || format!("Visit {visit_number}");
    let Some(rule) = rule else {
        return fallback();
    };
    let trimmed = rule.trim();
    if trimmed.is_empty() {
        return fallback();
    }
    let Some((prefix, start)) = split_rule(trimmed) else {
        return fallback();
    };
    match start.checked_add(visit_number.saturating_sub(1)) {
        Some(number) => format!("{prefix}{number}"),
        None => fallback(),
    }
}

/// Split `V12` into `("V", 12)`. The whole rule must be an optional ASCII
/// alphabetic prefix plus a number, or it does not count as a rule.
fn split_rule(rule: &str) -> Option<(&str, u32)> {
    let digits_at = rule.find(|c: char| c.is_ascii_digit())?;
    let (prefix, digits) = rule.split_at(digits_at);
    if !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let start: u32 = digits.parse().ok()?;
    Some((prefix, start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rule_uses_ordinal() {
        assert_eq!(visit_label(None, 3), "Visit 3");
        assert_eq!(visit_label(Some("  "), 1), "Visit 1");
    }

    #[test]
    fn prefixed_rule_advances_from_start() {
        assert_eq!(visit_label(Some("V1"), 1), "V1");
        assert_eq!(visit_label(Some("V1"), 4), "V4");
        assert_eq!(visit_label(Some("C3"), 2), "C4");
    }

    #[test]
    fn bare_number_rule() {
        assert_eq!(visit_label(Some("10"), 3), "12");
    }

    #[test]
    fn malformed_rule_falls_back() {
        assert_eq!(visit_label(Some("V"), 2), "Visit 2");
        assert_eq!(visit_label(Some("1V"), 2), "Visit 2");
        assert_eq!(visit_label(Some("V-1"), 2), "Visit 2");
    }
}
