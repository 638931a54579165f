//! The five UI-triggered handlers.
//!
//! # Design
//! `Session` owns the client, the transport, the user-io seam, the view,
//! and the create form. Every handler catches its own failures and converts
//! them into a user-visible message: an inline error line for the list
//! view, a blocking alert for mutations. Transport failures and failure
//! envelopes surface identically; neither is retried.
//!
//! Submit guards (`create_busy`, `EditForm::saving`) are set for the
//! duration of their own request and cleared unconditionally afterward,
//! including on failure. They guard double submission only; overlapping
//! operations on different controls are not serialized, and the last
//! response to arrive wins.

use students_core::{ApiError, Student, StudentClient, StudentDraft, StudentId};

use crate::forms::{CreateForm, EditForm};
use crate::transport::{Transport, TransportError};
use crate::view::{Card, CardMode, ListView};

/// Anything that stops an operation: the request never completed, or the
/// envelope said no. Both display as their bare message.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Blocking notifications and confirmation prompts.
pub trait UserIo {
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, prompt: &str) -> bool;
}

pub struct Session<T, U> {
    client: StudentClient,
    pub transport: T,
    pub ui: U,
    pub view: ListView,
    pub create_form: CreateForm,
    create_busy: bool,
}

impl<T: Transport, U: UserIo> Session<T, U> {
    pub fn new(base_url: &str, transport: T, ui: U) -> Self {
        Self {
            client: StudentClient::new(base_url),
            transport,
            ui,
            view: ListView::default(),
            create_form: CreateForm::default(),
            create_busy: false,
        }
    }

    /// Re-fetch the list and rebuild the view from scratch. On failure the
    /// error message takes the place of the list.
    pub fn refresh(&mut self) {
        self.view = ListView::Loading;
        match self.fetch_students() {
            Ok(students) => {
                self.view = ListView::Students(students.into_iter().map(Card::new).collect());
            }
            Err(err) => {
                tracing::warn!(error = %err, "list fetch failed");
                self.view = ListView::Error(err.to_string());
            }
        }
    }

    /// Submit the create form. Success clears the form, reloads the list,
    /// and announces the created record; failure leaves the form untouched.
    pub fn submit_create(&mut self) {
        if self.create_busy {
            return;
        }
        self.create_busy = true;
        let result = self.create_student();
        self.create_busy = false;

        match result {
            Ok(created) => {
                self.create_form.reset();
                self.refresh();
                self.ui.alert(&format!("Created: {}", created.full_name()));
            }
            Err(err) => self.ui.alert(&err.to_string()),
        }
    }

    /// Fetch the record's current values and swap its card into edit mode.
    /// On failure the card is left as it was.
    pub fn begin_edit(&mut self, id: StudentId) {
        match self.fetch_student(id) {
            Ok(student) => {
                if let Some(card) = self.view.card_mut(id) {
                    card.mode = CardMode::Edit(EditForm::from_student(&student));
                    card.student = student;
                }
            }
            Err(err) => self.ui.alert(&format!("Failed to edit: {err}")),
        }
    }

    /// Submit the inline edit form for `id`. No-op unless the card is in
    /// edit mode and not already saving.
    pub fn submit_edit(&mut self, id: StudentId) {
        let draft = match self.view.edit_form_mut(id) {
            Some(form) if form.saving => return,
            Some(form) => {
                form.saving = true;
                form.to_draft()
            }
            None => return,
        };

        let result = self.update_student(id, &draft);
        if let Some(form) = self.view.edit_form_mut(id) {
            form.saving = false;
        }

        match result {
            Ok(_) => {
                self.ui.alert("Updated successfully");
                self.refresh();
            }
            Err(err) => self.ui.alert(&err.to_string()),
        }
    }

    /// Discard the inline form and return the card to display mode. No
    /// request is sent.
    pub fn cancel_edit(&mut self, id: StudentId) {
        if let Some(card) = self.view.card_mut(id) {
            card.mode = CardMode::Display;
        }
    }

    /// Delete after an explicit confirmation; declining sends nothing.
    pub fn delete(&mut self, id: StudentId) {
        if !self.ui.confirm("Delete this student?") {
            return;
        }
        match self.delete_student(id) {
            Ok(()) => {
                self.ui.alert("Deleted successfully");
                self.refresh();
            }
            Err(err) => self.ui.alert(&err.to_string()),
        }
    }

    fn fetch_students(&self) -> Result<Vec<Student>, ClientError> {
        let req = self.client.build_list_students();
        let resp = self.transport.execute(&req)?;
        Ok(self.client.parse_list_students(resp)?)
    }

    fn fetch_student(&self, id: StudentId) -> Result<Student, ClientError> {
        let req = self.client.build_get_student(id);
        let resp = self.transport.execute(&req)?;
        Ok(self.client.parse_get_student(resp)?)
    }

    fn create_student(&self) -> Result<Student, ClientError> {
        let draft = self.create_form.to_draft();
        let req = self.client.build_create_student(&draft)?;
        let resp = self.transport.execute(&req)?;
        Ok(self.client.parse_create_student(resp)?)
    }

    fn update_student(&self, id: StudentId, draft: &StudentDraft) -> Result<(), ClientError> {
        let req = self.client.build_update_student(id, draft)?;
        let resp = self.transport.execute(&req)?;
        self.client.parse_update_student(resp)?;
        Ok(())
    }

    fn delete_student(&self, id: StudentId) -> Result<(), ClientError> {
        let req = self.client.build_delete_student(id);
        let resp = self.transport.execute(&req)?;
        Ok(self.client.parse_delete_student(resp)?)
    }
}
