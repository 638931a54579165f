//! Form state with named-field access.
//!
//! Both forms hold raw text exactly as typed. Converting to a
//! `StudentDraft` applies the client-side rules: the two name fields are
//! trimmed, and a blank `amount_due` on the create form becomes `"0"`.
//! `dob` and `amount_due` otherwise pass through untouched; the backend
//! owns their validation.

use students_core::{Student, StudentDraft};

/// The "add student" form. Reset only after a successful create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub amount_due: String,
}

impl CreateForm {
    pub fn to_draft(&self) -> StudentDraft {
        StudentDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            dob: self.dob.clone(),
            amount_due: if self.amount_due.is_empty() {
                "0".to_string()
            } else {
                self.amount_due.clone()
            },
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The inline edit form replacing a card, pre-populated from a fresh fetch
/// of the record. `saving` is the per-form submit guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub amount_due: String,
    pub saving: bool,
}

impl EditForm {
    pub fn from_student(student: &Student) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            dob: student.dob.to_string(),
            amount_due: student.amount_due.to_string(),
            saving: false,
        }
    }

    pub fn to_draft(&self) -> StudentDraft {
        StudentDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            dob: self.dob.clone(),
            amount_due: self.amount_due.clone(),
        }
    }
}
