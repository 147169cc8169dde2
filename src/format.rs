//! Masked text formatting for form fields
//!
//! Each mask strips non-digit characters from raw keystroke input and
//! re-inserts its separators positionally. Partial input produces a
//! partial mask, digits beyond the mask's capacity are dropped, and
//! applying a mask to its own output is a no-op.

/// Input mask applied to a field while the user types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    /// `DDD.DDD.DDD-DD`
    Cpf,
    /// `(DD) DDDD-DDDD`
    Landline,
    /// `(DD) DDDDD-DDDD`
    Mobile,
    /// `DD/MM/YYYY`
    BirthDate,
    /// `DDDDD-DDD`
    Cep,
}

impl Mask {
    /// Length of the fully masked representation
    pub fn canonical_len(&self) -> usize {
        match self {
            Mask::Cpf => 14,
            Mask::Landline => 14,
            Mask::Mobile => 15,
            Mask::BirthDate => 10,
            Mask::Cep => 9,
        }
    }

    /// Number of digits a fully masked value holds
    pub fn max_digits(&self) -> usize {
        match self {
            Mask::Cpf => 11,
            Mask::Landline => 10,
            Mask::Mobile => 11,
            Mask::BirthDate => 8,
            Mask::Cep => 8,
        }
    }

    /// Apply the mask to raw input
    ///
    /// Non-digits are stripped first, so pasting an already-masked value
    /// (or typing stray punctuation) is harmless.
    pub fn apply(&self, raw: &str) -> String {
        let digits: String = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(self.max_digits())
            .collect();

        match self {
            Mask::Cpf => group(&digits, &[3, 3, 3, 2], &["", ".", ".", "-"]),
            Mask::Landline => phone(&digits, 4),
            Mask::Mobile => phone(&digits, 5),
            Mask::BirthDate => group(&digits, &[2, 2, 4], &["", "/", "/"]),
            Mask::Cep => group(&digits, &[5, 3], &["", "-"]),
        }
    }
}

/// Lay `digits` out in `groups`, emitting `seps[i]` before group `i` only
/// once that group has at least one digit.
fn group(digits: &str, groups: &[usize], seps: &[&str]) -> String {
    let mut out = String::new();
    let mut rest = digits;
    for (&len, &sep) in groups.iter().zip(seps) {
        if rest.is_empty() {
            break;
        }
        out.push_str(sep);
        let take = len.min(rest.len());
        out.push_str(&rest[..take]);
        rest = &rest[take..];
    }
    out
}

/// Phone layout `(DD) D…-DDDD` with an area-code prefix that only appears
/// once a third digit arrives (one or two digits display bare).
fn phone(digits: &str, exchange_len: usize) -> String {
    if digits.len() <= 2 {
        return digits.to_string();
    }
    format!(
        "({}) {}",
        &digits[..2],
        group(&digits[2..], &[exchange_len, 4], &["", "-"])
    )
}
