//! Pure field validators for the registration form
//!
//! Every validator accepts either raw or masked input (non-digits are
//! stripped where relevant), returns a plain `bool`, and never panics.
//! The only fallible operation is [`calculate_age`], which rejects
//! strings that are not a real `DD/MM/YYYY` date.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Digits a CPF carries, including its two check digits
const CPF_LEN: usize = 11;

/// Special characters accepted (and required) in passwords
const PASSWORD_SPECIALS: &str = "@$!%*?&#";

/// Minimum password length
const MIN_PASSWORD_LEN: usize = 8;

/// Raised when a birth-date string is not a valid `DD/MM/YYYY` date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("birth date is not a valid DD/MM/YYYY date")]
pub struct DateError;

/// A full name needs at least two whitespace-separated names
pub fn validate_name(name: &str) -> bool {
    name.split_whitespace().count() >= 2
}

/// Validate a CPF's two weighted modulo-11 check digits
///
/// Non-digits are stripped first; anything other than 11 digits fails.
/// The first check digit is computed over positions 0..9 with weights
/// descending from 10, the second over positions 0..10 with weights
/// descending from 11; a remainder below 2 maps to check digit 0.
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != CPF_LEN {
        return false;
    }
    check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
}

/// Weighted mod-11 check digit, weights descending from `first_weight`
fn check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();
    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => 11 - remainder,
    }
}

/// A CEP is exactly 8 digits once punctuation is stripped
pub fn validate_cep(cep: &str) -> bool {
    digit_count(cep) == 8
}

/// Permissive phone rule: 10 (landline) or 11 (mobile) digits
///
/// Deliberately does not distinguish the two kinds; callers that want
/// strict per-kind lengths enforce them at the form level.
pub fn validate_phone(phone: &str) -> bool {
    (10..=11).contains(&digit_count(phone))
}

/// Count the ASCII digits in `value`
pub fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

/// Minimal `local@domain.tld` shape check
///
/// No whitespace, exactly one `@`, a non-empty local part, and a dot
/// inside the domain with at least one character on each side.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Password strength: length plus one of each required character class
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Age in whole years at `today` for someone born on `birth`
///
/// Counts calendar years and subtracts one while this year's birthday is
/// still ahead. A birth date after `today` yields a negative age.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Parse a `DD/MM/YYYY` string and compute the age at `today`
///
/// Callers gate on the full canonical date length before calling;
/// partial input simply fails to parse.
pub fn calculate_age(date: &str, today: NaiveDate) -> Result<i32, DateError> {
    let birth = NaiveDate::parse_from_str(date, "%d/%m/%Y").map_err(|_| DateError)?;
    Ok(age_on(birth, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod name {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_single_name_rejected() {
            assert!(!validate_name("Maria"));
            assert!(!validate_name(""));
            assert!(!validate_name("   "));
        }

        #[test]
        fn test_two_names_accepted() {
            assert!(validate_name("Maria Souza"));
        }

        #[test]
        fn test_surrounding_and_repeated_whitespace_ignored() {
            assert!(validate_name("  Ana   Paula  "));
            assert!(validate_name("Ana\tPaula"));
        }
    }

    mod cpf {
        use super::*;
        use pretty_assertions::assert_eq;

        /// Build a checksum-valid CPF from its first nine digits
        fn make_cpf(prefix: [u32; 9]) -> String {
            let mut digits = prefix.to_vec();
            digits.push(check_digit(&digits, 10));
            digits.push(check_digit(&digits, 11));
            digits.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect()
        }

        #[test]
        fn test_known_valid_cpfs() {
            assert!(validate_cpf("52998224725"));
            assert!(validate_cpf("111.444.777-35"));
        }

        #[test]
        fn test_generated_cpfs_are_valid() {
            let prefixes = [
                [0, 0, 0, 0, 0, 0, 0, 0, 1],
                [1, 2, 3, 4, 5, 6, 7, 8, 9],
                [5, 2, 9, 9, 8, 2, 2, 4, 7],
                [9, 8, 7, 6, 5, 4, 3, 2, 1],
                [3, 0, 7, 1, 4, 9, 2, 8, 6],
            ];
            for prefix in prefixes {
                let cpf = make_cpf(prefix);
                assert!(validate_cpf(&cpf), "{cpf} should validate");
            }
        }

        #[test]
        fn test_single_digit_mutations_almost_always_fail() {
            // A mutation can land on another valid CPF only when both
            // check equations still hold, which the mod-11 weighting
            // makes rare: out of the 99 single-digit mutants, no more
            // than 99/11 may slip through.
            let cpf: Vec<u32> = "52998224725".chars().filter_map(|c| c.to_digit(10)).collect();
            let mut passing = 0;
            for pos in 0..CPF_LEN {
                for delta in 1..10 {
                    let mut mutant = cpf.clone();
                    mutant[pos] = (mutant[pos] + delta) % 10;
                    let s: String = mutant
                        .iter()
                        .map(|d| char::from_digit(*d, 10).unwrap())
                        .collect();
                    if validate_cpf(&s) {
                        passing += 1;
                    }
                }
            }
            assert!(passing <= 9, "{passing} mutants validated");
        }

        #[test]
        fn test_masked_input_accepted() {
            assert!(validate_cpf("529.982.247-25"));
        }

        #[test]
        fn test_wrong_length_rejected() {
            assert!(!validate_cpf(""));
            assert!(!validate_cpf("5299822472"));
            assert!(!validate_cpf("529982247255"));
        }

        #[test]
        fn test_wrong_check_digits_rejected() {
            assert!(!validate_cpf("52998224726"));
            assert!(!validate_cpf("52998224735"));
        }

        #[test]
        fn test_repeated_digits_satisfying_checksum_accepted() {
            // Legacy behavior: the checksum alone decides, and repeated
            // sequences like this one satisfy it.
            assert!(validate_cpf("11111111111"));
        }
    }

    mod cep {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_eight_digits_required() {
            assert!(validate_cep("01310100"));
            assert!(validate_cep("01310-100"));
            assert!(!validate_cep("0131010"));
            assert!(!validate_cep("013101000"));
            assert!(!validate_cep(""));
        }
    }

    mod phone {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_ten_or_eleven_digits_accepted() {
            assert!(validate_phone("(11) 4567-8901"));
            assert!(validate_phone("(11) 98765-4321"));
            assert!(validate_phone("1145678901"));
        }

        #[test]
        fn test_other_lengths_rejected() {
            assert!(!validate_phone("(11) 4567-890"));
            assert!(!validate_phone("119876543210"));
            assert!(!validate_phone(""));
        }
    }

    mod email {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_basic_shapes() {
            assert!(validate_email("a@b.co"));
            assert!(!validate_email("a@b"));
            assert!(!validate_email("a.b.com"));
        }

        #[test]
        fn test_dot_placement_in_domain() {
            assert!(!validate_email("a@.bc"));
            assert!(!validate_email("a@bc."));
            assert!(validate_email("a@b.c.d"));
        }

        #[test]
        fn test_whitespace_and_extra_at_rejected() {
            assert!(!validate_email("a b@c.co"));
            assert!(!validate_email("a@b@c.co"));
            assert!(!validate_email("@b.co"));
        }
    }

    mod password {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_classes_rejected() {
            assert!(!validate_password("abcdefgh"));
            assert!(!validate_password("ABCDEFG1!"));
            assert!(!validate_password("abcdefg1!"));
            assert!(!validate_password("Abcdefgh!"));
            assert!(!validate_password("Abcdefg1"));
        }

        #[test]
        fn test_too_short_rejected() {
            assert!(!validate_password("Abc1!"));
        }

        #[test]
        fn test_strong_password_accepted() {
            assert!(validate_password("Abcdef1!"));
            assert!(validate_password("S3nha#Forte"));
        }
    }

    mod age {
        use super::*;
        use pretty_assertions::assert_eq;

        fn date(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        }

        #[test]
        fn test_reference_date_example() {
            assert_eq!(calculate_age("15/05/2010", date(2025, 1, 1)), Ok(14));
        }

        #[test]
        fn test_birthday_boundary() {
            let birth = date(2010, 5, 15);
            assert_eq!(age_on(birth, date(2025, 5, 14)), 14);
            assert_eq!(age_on(birth, date(2025, 5, 15)), 15);
            assert_eq!(age_on(birth, date(2025, 5, 16)), 15);
        }

        #[test]
        fn test_future_birth_date_goes_negative() {
            assert_eq!(age_on(date(2030, 1, 1), date(2025, 1, 1)), -5);
        }

        #[test]
        fn test_partial_or_impossible_dates_rejected() {
            assert_eq!(calculate_age("15/05", date(2025, 1, 1)), Err(DateError));
            assert_eq!(calculate_age("32/01/2000", date(2025, 1, 1)), Err(DateError));
            assert_eq!(calculate_age("31/02/2020", date(2025, 1, 1)), Err(DateError));
            assert_eq!(calculate_age("", date(2025, 1, 1)), Err(DateError));
        }
    }
}
