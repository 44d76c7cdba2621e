//! Settings form surface
//!
//! The controller talks to a form through [`SettingsForm`] instead of a
//! concrete UI toolkit. [`MemoryForm`] is the toolkit-free form model: the TUI
//! renders it and tests drive it directly.

use crate::prefs::BUILTIN_INVOICE_FIELDS;
use std::collections::BTreeMap;

/// Addressable form inputs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Country,
    Currency,
    TimeRange,
    AxisRange,
    DateFormat,
    TimeFormat,
    /// Checkbox of the invoice field with this key
    InvoiceField(String),
}

impl FormField {
    /// The scalar (non-checkbox) inputs, in display order
    pub const SCALARS: [FormField; 6] = [
        FormField::Country,
        FormField::Currency,
        FormField::TimeRange,
        FormField::AxisRange,
        FormField::DateFormat,
        FormField::TimeFormat,
    ];

    pub fn label(&self) -> &str {
        match self {
            FormField::Country => "Country",
            FormField::Currency => "Currency",
            FormField::TimeRange => "Default time range",
            FormField::AxisRange => "Default axis range",
            FormField::DateFormat => "Date format",
            FormField::TimeFormat => "Time format",
            FormField::InvoiceField(key) => key,
        }
    }
}

/// Value held by an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Checked(_) => None,
        }
    }

    pub fn as_checked(&self) -> Option<bool> {
        match self {
            FieldValue::Checked(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

/// A form the settings controller can bind to
///
/// Inputs may be missing; reads of a missing input return `None` and writes
/// to it are ignored.
pub trait SettingsForm {
    fn read(&self, field: &FormField) -> Option<FieldValue>;

    /// Write `value`; returns `false` if the input does not exist
    fn write(&mut self, field: &FormField, value: FieldValue) -> bool;

    /// Create a checkbox row for an invoice field
    fn add_invoice_field(&mut self, key: &str, label: &str, checked: bool);

    /// Delete an invoice field row
    fn remove_invoice_field(&mut self, key: &str);
}

/// One invoice checkbox row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRow {
    pub key: String,
    pub label: String,
    pub checked: bool,
}

/// In-memory form model
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    values: BTreeMap<FormField, FieldValue>,
    /// Invoice rows in display order: (key, label)
    invoice_rows: Vec<(String, String)>,
}

impl MemoryForm {
    /// A form without any inputs
    pub fn empty() -> Self {
        Self::default()
    }

    /// A form with every scalar input and the built-in invoice checkboxes
    pub fn complete() -> Self {
        let mut form = Self::with_scalars(FormField::SCALARS);
        for field in BUILTIN_INVOICE_FIELDS {
            form.add_invoice_field(field.key, field.label, field.enabled_by_default);
        }
        form
    }

    /// A form with only the given scalar inputs, initially blank
    pub fn with_scalars(fields: impl IntoIterator<Item = FormField>) -> Self {
        let mut form = Self::default();
        for field in fields {
            if !matches!(field, FormField::InvoiceField(_)) {
                form.values.insert(field, FieldValue::Text(String::new()));
            }
        }
        form
    }

    pub fn has(&self, field: &FormField) -> bool {
        self.values.contains_key(field)
    }

    pub fn text(&self, field: &FormField) -> Option<&str> {
        self.values.get(field).and_then(|v| v.as_text())
    }

    pub fn is_checked(&self, key: &str) -> Option<bool> {
        self.values
            .get(&FormField::InvoiceField(key.to_string()))
            .and_then(|v| v.as_checked())
    }

    /// Flip an invoice checkbox; returns the new state
    pub fn toggle_checkbox(&mut self, key: &str) -> Option<bool> {
        let field = FormField::InvoiceField(key.to_string());
        let next = !self.values.get(&field)?.as_checked()?;
        self.values.insert(field, FieldValue::Checked(next));
        Some(next)
    }

    /// Invoice rows in display order
    pub fn invoice_rows(&self) -> Vec<InvoiceRow> {
        self.invoice_rows
            .iter()
            .map(|(key, label)| InvoiceRow {
                key: key.clone(),
                label: label.clone(),
                checked: self.is_checked(key).unwrap_or(false),
            })
            .collect()
    }
}

impl SettingsForm for MemoryForm {
    fn read(&self, field: &FormField) -> Option<FieldValue> {
        self.values.get(field).cloned()
    }

    fn write(&mut self, field: &FormField, value: FieldValue) -> bool {
        match self.values.get_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn add_invoice_field(&mut self, key: &str, label: &str, checked: bool) {
        let field = FormField::InvoiceField(key.to_string());
        if !self.values.contains_key(&field) {
            self.invoice_rows.push((key.to_string(), label.to_string()));
        }
        self.values.insert(field, FieldValue::Checked(checked));
    }

    fn remove_invoice_field(&mut self, key: &str) {
        let field = FormField::InvoiceField(key.to_string());
        self.values.remove(&field);
        self.invoice_rows.retain(|(k, _)| k != key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_form_has_builtin_rows() {
        let form = MemoryForm::complete();
        let keys: Vec<_> = form.invoice_rows().into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["name", "price", "weight", "quantity"]);
        assert!(form.has(&FormField::DateFormat));
    }

    #[test]
    fn test_write_to_missing_input_is_ignored() {
        let mut form = MemoryForm::with_scalars([FormField::Country]);
        assert!(form.write(&FormField::Country, FieldValue::Text("us".into())));
        assert!(!form.write(&FormField::Currency, FieldValue::Text("USD".into())));
        assert_eq!(form.read(&FormField::Currency), None);
    }

    #[test]
    fn test_toggle_and_remove_rows() {
        let mut form = MemoryForm::complete();
        assert_eq!(form.toggle_checkbox("weight"), Some(true));
        form.remove_invoice_field("weight");
        assert_eq!(form.is_checked("weight"), None);
        assert_eq!(form.toggle_checkbox("weight"), None);
        assert_eq!(form.invoice_rows().len(), 3);
    }
}
