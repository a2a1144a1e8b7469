//! Parsing of frequency/window interval specs.
//!
//! A spec is either a single integer broadcast to every interval or a
//! comma-separated list with exactly one value per interval. Windows accept
//! zero (no tolerance); frequencies must advance time by at least one day.

use tvs_model::{SpecError, SpecField};

/// Parse an interval spec into exactly `count` values.
///
/// A blank window spec means "no tolerance anywhere" and yields zeros; a
/// blank frequency spec has no such default and is rejected.
pub fn parse_interval_list(
    spec: &str,
    count: usize,
    field: SpecField,
) -> Result<Vec<i64>, SpecError> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return match field {
            SpecField::Window => Ok(vec![0; count]),
            SpecField::Frequency => Err(SpecError::NotNumeric {
                token: String::new(),
            }),
        };
    }

    let values = if trimmed.contains(',') {
        let tokens: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if tokens.len() != count {
            return Err(SpecError::CountMismatch {
                expected: count,
                found: tokens.len(),
            });
        }
        tokens
            .into_iter()
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        vec![parse_token(trimmed)?; count]
    };

    for &value in &values {
        check_range(value, field)?;
    }
    Ok(values)
}

fn parse_token(token: &str) -> Result<i64, SpecError> {
    token.parse::<i64>().map_err(|_| SpecError::NotNumeric {
        token: token.to_string(),
    })
}

fn check_range(value: i64, field: SpecField) -> Result<(), SpecError> {
    match field {
        SpecField::Frequency if value < 1 => Err(SpecError::OutOfRange {
            value,
            requirement: "visit intervals must be at least one day",
        }),
        SpecField::Window if value < 0 => Err(SpecError::OutOfRange {
            value,
            requirement: "visit windows must not be negative",
        }),
        _ => Ok(()),
    }
}
