//! Ordered form steps and their field ownership

use serde::{Deserialize, Serialize};

use super::field::FieldId;

/// One of the three ordered stages of the registration form
///
/// A step unlocks the next only once every field it owns validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    Personal,
    Address,
    Account,
}

impl Step {
    /// Step a fresh session starts on
    pub const FIRST: Step = Step::Personal;

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Step::Personal => "Personal information",
            Step::Address => "Address",
            Step::Account => "Account",
        }
    }

    /// 1-based position in the sequence
    pub fn number(&self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::Address => 2,
            Step::Account => 3,
        }
    }

    /// Fields validated together before this step unlocks the next
    pub fn fields(&self) -> &'static [FieldId] {
        match self {
            Step::Personal => &[
                FieldId::FullName,
                FieldId::BirthDate,
                FieldId::Cpf,
                FieldId::Landline,
                FieldId::Mobile,
            ],
            Step::Address => &[
                FieldId::FatherName,
                FieldId::MotherName,
                FieldId::Cep,
                FieldId::Street,
                FieldId::Number,
                FieldId::Complement,
                FieldId::City,
                FieldId::State,
            ],
            Step::Account => &[FieldId::Email, FieldId::Password, FieldId::ConfirmPassword],
        }
    }

    /// Following step, if any
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Personal => Some(Step::Address),
            Step::Address => Some(Step::Account),
            Step::Account => None,
        }
    }

    /// Preceding step, if any
    pub fn prev(&self) -> Option<Step> {
        match self {
            Step::Personal => None,
            Step::Address => Some(Step::Personal),
            Step::Account => Some(Step::Address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_steps_are_ordered() {
        assert!(Step::Personal < Step::Address);
        assert!(Step::Address < Step::Account);
        assert_eq!(Step::FIRST, Step::Personal);
    }

    #[test]
    fn test_next_and_prev_are_inverses() {
        assert_eq!(Step::Personal.next(), Some(Step::Address));
        assert_eq!(Step::Address.next(), Some(Step::Account));
        assert_eq!(Step::Account.next(), None);
        assert_eq!(Step::Account.prev(), Some(Step::Address));
        assert_eq!(Step::Address.prev(), Some(Step::Personal));
        assert_eq!(Step::Personal.prev(), None);
    }

    #[test]
    fn test_every_field_owned_by_exactly_one_step() {
        let mut owned: Vec<FieldId> = [Step::Personal, Step::Address, Step::Account]
            .iter()
            .flat_map(|s| s.fields().iter().copied())
            .collect();
        owned.sort();
        let mut all = FieldId::ALL.to_vec();
        all.sort();
        assert_eq!(owned, all);
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(Step::Personal.number(), 1);
        assert_eq!(Step::Address.number(), 2);
        assert_eq!(Step::Account.number(), 3);
    }
}
