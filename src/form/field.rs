//! Field identity and per-field dispatch tables
//!
//! `FieldId` replaces name-string dispatch: each variant knows its
//! display label, its input mask (if any) and the validation rule the
//! session applies to it.

use serde::{Deserialize, Serialize};

use crate::format::Mask;

/// Every field of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldId {
    FullName,
    BirthDate,
    Cpf,
    Landline,
    Mobile,
    FatherName,
    MotherName,
    Cep,
    Street,
    Number,
    Complement,
    City,
    State,
    Email,
    Password,
    ConfirmPassword,
}

/// Validation rule attached to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At least two whitespace-separated names
    FullName,
    /// Present; age and the minor flag are derived separately
    BirthDate,
    /// Weighted mod-11 check digits
    Cpf,
    /// 10 or 11 digits (exact per-kind length in strict mode)
    Phone,
    /// Exactly 8 digits
    Cep,
    /// `local@domain.tld` shape
    Email,
    /// Present and strong
    Password,
    /// Present and equal to the password field
    PasswordConfirmation,
    /// Non-empty
    Required,
    /// Non-empty while the registrant is a minor
    RequiredIfMinor,
    /// Always accepted
    Optional,
}

impl FieldId {
    /// All fields, in form order
    pub const ALL: [FieldId; 16] = [
        FieldId::FullName,
        FieldId::BirthDate,
        FieldId::Cpf,
        FieldId::Landline,
        FieldId::Mobile,
        FieldId::FatherName,
        FieldId::MotherName,
        FieldId::Cep,
        FieldId::Street,
        FieldId::Number,
        FieldId::Complement,
        FieldId::City,
        FieldId::State,
        FieldId::Email,
        FieldId::Password,
        FieldId::ConfirmPassword,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::FullName => "Full name",
            FieldId::BirthDate => "Birth date (DD/MM/YYYY)",
            FieldId::Cpf => "CPF",
            FieldId::Landline => "Landline phone",
            FieldId::Mobile => "Mobile phone",
            FieldId::FatherName => "Father's name",
            FieldId::MotherName => "Mother's name",
            FieldId::Cep => "CEP",
            FieldId::Street => "Street",
            FieldId::Number => "Number",
            FieldId::Complement => "Complement (optional)",
            FieldId::City => "City",
            FieldId::State => "State",
            FieldId::Email => "Email",
            FieldId::Password => "Password",
            FieldId::ConfirmPassword => "Confirm password",
        }
    }

    /// Input mask applied while typing, if any
    pub fn mask(&self) -> Option<Mask> {
        match self {
            FieldId::Cpf => Some(Mask::Cpf),
            FieldId::Landline => Some(Mask::Landline),
            FieldId::Mobile => Some(Mask::Mobile),
            FieldId::BirthDate => Some(Mask::BirthDate),
            FieldId::Cep => Some(Mask::Cep),
            _ => None,
        }
    }

    /// Validation rule the session applies to this field
    pub fn rule(&self) -> Rule {
        match self {
            FieldId::FullName => Rule::FullName,
            FieldId::BirthDate => Rule::BirthDate,
            FieldId::Cpf => Rule::Cpf,
            FieldId::Landline | FieldId::Mobile => Rule::Phone,
            FieldId::FatherName | FieldId::MotherName => Rule::RequiredIfMinor,
            FieldId::Cep => Rule::Cep,
            FieldId::Street | FieldId::Number | FieldId::City | FieldId::State => Rule::Required,
            FieldId::Complement => Rule::Optional,
            FieldId::Email => Rule::Email,
            FieldId::Password => Rule::Password,
            FieldId::ConfirmPassword => Rule::PasswordConfirmation,
        }
    }
}
