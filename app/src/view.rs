//! The rendered list view.
//!
//! # Design
//! Rendering is a pure function of the view state: the same list of
//! students always produces the same text, and every successful mutation
//! rebuilds the state from a fresh list fetch rather than patching cards in
//! place. A card is either in display mode or replaced inline by its edit
//! form.

use std::fmt::Write;

use students_core::{Student, StudentId};

use crate::forms::EditForm;

/// Amount due as currency with exactly two fractional digits.
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardMode {
    Display,
    Edit(EditForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub student: Student,
    pub mode: CardMode,
}

impl Card {
    pub fn new(student: Student) -> Self {
        Self {
            student,
            mode: CardMode::Display,
        }
    }

    // Writes to a String cannot fail.
    fn render(&self, out: &mut String) {
        match &self.mode {
            CardMode::Display => {
                let _ = writeln!(out, "[{}] {}", self.student.student_id, self.student.full_name());
                let _ = writeln!(out, "    DOB: {}", self.student.dob);
                let _ = writeln!(out, "    Amount Due: {}", format_amount(self.student.amount_due));
            }
            CardMode::Edit(form) => {
                let _ = writeln!(out, "[{}] (editing)", self.student.student_id);
                let _ = writeln!(out, "    First name: {}", form.first_name);
                let _ = writeln!(out, "    Last name: {}", form.last_name);
                let _ = writeln!(out, "    DOB: {}", form.dob);
                let _ = writeln!(out, "    Amount due: {}", form.amount_due);
            }
        }
    }
}

/// The list area of the page: loading placeholder, an error line in place
/// of the list, or one card per student.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Students(Vec<Card>),
    Error(String),
}

impl Default for ListView {
    fn default() -> Self {
        ListView::Loading
    }
}

impl ListView {
    pub fn render(&self) -> String {
        match self {
            ListView::Loading => "Loading...\n".to_string(),
            ListView::Error(message) => format!("{message}\n"),
            ListView::Students(cards) if cards.is_empty() => "No students found\n".to_string(),
            ListView::Students(cards) => {
                let mut out = String::new();
                for card in cards {
                    card.render(&mut out);
                }
                out
            }
        }
    }

    pub fn card_mut(&mut self, id: StudentId) -> Option<&mut Card> {
        match self {
            ListView::Students(cards) => {
                cards.iter_mut().find(|c| c.student.student_id == id)
            }
            _ => None,
        }
    }

    pub fn edit_form_mut(&mut self, id: StudentId) -> Option<&mut EditForm> {
        match self.card_mut(id)? {
            Card {
                mode: CardMode::Edit(form),
                ..
            } => Some(form),
            _ => None,
        }
    }
}
