//! Settings form binding
//!
//! A toolkit-independent form model and the controller that binds it to the
//! preference store.

pub mod controller;
pub mod fields;
pub mod form;

pub use controller::{Notice, Notifier, PendingRemoval, SettingsFormController};
pub use fields::{FieldError, custom_field_key, slugify};
pub use form::{FieldValue, FormField, InvoiceRow, MemoryForm, SettingsForm};

/// Notifier that records every notice, for headless callers
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

impl Notifier for RecordingNotifier {
    fn acknowledge(&mut self, notice: &Notice) {
        tracing::info!("{}", notice);
        self.notices.push(notice.clone());
    }
}
