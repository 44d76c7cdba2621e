//! Settings form controller
//!
//! Binds a [`SettingsForm`] to the preference record: fills the form from the
//! stored record, reads it back, saves or discards, and manages invoice field
//! additions and confirmed removals.

use super::fields::{self, FieldError};
use super::form::{FieldValue, FormField, SettingsForm};
use crate::prefs::countries::{self, Country};
use crate::prefs::schema::builtin_field;
use crate::prefs::{
    BUILTIN_INVOICE_FIELDS, DateFormat, PreferenceResult, PreferenceStore, Preferences, TimeFormat,
    TimeRange,
};
use std::collections::BTreeMap;
use std::fmt;

/// Blocking acknowledgements shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved,
    Discarded,
    DuplicateField { name: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Saved => f.write_str("Settings saved successfully!"),
            Notice::Discarded => f.write_str("Changes discarded"),
            Notice::DuplicateField { name } => {
                write!(f, "A field named \"{}\" already exists", name)
            }
        }
    }
}

/// Shows acknowledgements to the user
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn acknowledge(&mut self, notice: &Notice);
}

/// A removal waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    pub key: String,
    pub label: String,
    /// Custom fields are deleted; built-ins are only unchecked
    pub custom: bool,
}

impl PendingRemoval {
    pub fn confirmation_message(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.label)
    }
}

/// Binds a form to the preference store
pub struct SettingsFormController<F: SettingsForm, N: Notifier> {
    store: PreferenceStore,
    form: F,
    notifier: N,
    /// Custom fields currently shown in the form: key → label
    custom_fields: BTreeMap<String, String>,
    pending: Option<PendingRemoval>,
}

impl<F: SettingsForm, N: Notifier> SettingsFormController<F, N> {
    /// Create the controller and fill the form from the stored record
    pub fn new(store: PreferenceStore, form: F, notifier: N) -> Self {
        let mut controller = Self {
            store,
            form,
            notifier,
            custom_fields: BTreeMap::new(),
            pending: None,
        };
        let prefs = controller.store.load();
        controller.load_into_form(&prefs);
        controller
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    pub fn pending_removal(&self) -> Option<&PendingRemoval> {
        self.pending.as_ref()
    }

    /// Custom fields currently in the form (key → label)
    pub fn custom_fields(&self) -> &BTreeMap<String, String> {
        &self.custom_fields
    }

    /// Set every known input from `prefs`; missing inputs are skipped
    pub fn load_into_form(&mut self, prefs: &Preferences) {
        let text = |s: &str| FieldValue::Text(s.to_string());
        self.form.write(&FormField::Country, text(&prefs.country));
        self.form.write(&FormField::Currency, text(&prefs.currency));
        self.form.write(
            &FormField::TimeRange,
            text(prefs.time_range_default.as_str()),
        );
        self.form
            .write(&FormField::AxisRange, text(&prefs.axis_range_default));
        self.form
            .write(&FormField::DateFormat, text(prefs.date_format.as_str()));
        self.form
            .write(&FormField::TimeFormat, text(prefs.time_format.as_str()));

        for field in BUILTIN_INVOICE_FIELDS {
            self.form.write(
                &FormField::InvoiceField(field.key.to_string()),
                FieldValue::Checked(prefs.is_invoice_field_enabled(field.key)),
            );
        }

        // Drop custom rows the record no longer has, then add/refresh the rest
        let stale: Vec<String> = self
            .custom_fields
            .keys()
            .filter(|key| !prefs.invoice_fields.contains_key(*key))
            .cloned()
            .collect();
        for key in stale {
            self.form.remove_invoice_field(&key);
        }

        self.custom_fields.clear();
        for key in prefs.ordered_field_keys() {
            if builtin_field(&key).is_some() {
                continue;
            }
            let label = prefs.field_label(&key);
            let enabled = prefs.is_invoice_field_enabled(&key);
            let field = FormField::InvoiceField(key.clone());
            if !self.form.write(&field, FieldValue::Checked(enabled)) {
                self.form.add_invoice_field(&key, &label, enabled);
            }
            self.custom_fields.insert(key, label);
        }

        tracing::debug!(
            "Loaded preferences into form ({} custom field(s))",
            self.custom_fields.len()
        );
    }

    /// Build a record from the form
    ///
    /// Missing or unparseable inputs keep the stored value. The theme is
    /// owned by the theme resolver and always taken from storage.
    pub fn read_from_form(&self) -> Preferences {
        let prior = self.store.load();

        let country = self
            .read_text(&FormField::Country)
            .and_then(|code| countries::find(&code))
            .map(|c| c.code.to_string())
            .unwrap_or_else(|| prior.country.clone());

        let currency = self
            .read_text(&FormField::Currency)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| prior.currency.clone());

        let time_range_default = self
            .read_text(&FormField::TimeRange)
            .and_then(|s| TimeRange::parse(&s))
            .unwrap_or(prior.time_range_default);

        let axis_range_default = self
            .read_text(&FormField::AxisRange)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| prior.axis_range_default.clone());

        let date_format = self
            .read_text(&FormField::DateFormat)
            .and_then(|s| DateFormat::parse(&s))
            .unwrap_or(prior.date_format);

        let time_format = self
            .read_text(&FormField::TimeFormat)
            .and_then(|s| TimeFormat::parse(&s))
            .unwrap_or(prior.time_format);

        let mut invoice_fields = BTreeMap::new();
        for field in BUILTIN_INVOICE_FIELDS {
            let enabled = self
                .read_checked(field.key)
                .or_else(|| prior.invoice_fields.get(field.key).copied())
                .unwrap_or(field.enabled_by_default);
            invoice_fields.insert(field.key.to_string(), enabled);
        }
        for key in self.custom_fields.keys() {
            let enabled = self
                .read_checked(key)
                .or_else(|| prior.invoice_fields.get(key).copied())
                .unwrap_or(true);
            invoice_fields.insert(key.clone(), enabled);
        }

        let mut prefs = Preferences {
            country,
            currency,
            theme: prior.theme,
            date_format,
            time_format,
            time_range_default,
            axis_range_default,
            invoice_fields,
            custom_field_labels: self.custom_fields.clone(),
        };
        prefs.normalize();
        prefs
    }

    /// Persist the form contents
    pub fn save(&mut self) -> PreferenceResult<Preferences> {
        let prefs = self.read_from_form();
        self.store.save(&prefs)?;
        tracing::info!("Settings saved");
        self.notifier.acknowledge(&Notice::Saved);
        Ok(prefs)
    }

    /// Discard form edits by reloading the stored record
    pub fn cancel(&mut self) {
        self.pending = None;
        let prefs = self.store.load();
        self.load_into_form(&prefs);
        tracing::info!("Settings edits discarded");
        self.notifier.acknowledge(&Notice::Discarded);
    }

    /// Keep the currency input in step with a newly selected country
    pub fn on_country_changed(&mut self, code: &str) -> Option<&'static Country> {
        let country = countries::find(code)?;
        self.form.write(
            &FormField::Country,
            FieldValue::Text(country.code.to_string()),
        );
        self.form.write(
            &FormField::Currency,
            FieldValue::Text(country.currency_code.to_string()),
        );
        Some(country)
    }

    /// Add an enabled custom invoice field
    ///
    /// Returns the new field's key. Empty names and names colliding
    /// (case-insensitively) with an existing label or key are rejected
    /// without touching the form.
    pub fn add_custom_field(&mut self, name: &str) -> Result<String, FieldError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FieldError::Empty);
        }

        let key = fields::custom_field_key(name);
        let lowered = name.to_lowercase();
        let duplicate = BUILTIN_INVOICE_FIELDS
            .iter()
            .any(|f| f.label.to_lowercase() == lowered || f.key == key)
            || self
                .custom_fields
                .iter()
                .any(|(k, label)| label.to_lowercase() == lowered || *k == key);

        if duplicate {
            tracing::debug!("Rejected duplicate invoice field '{}'", name);
            self.notifier.acknowledge(&Notice::DuplicateField {
                name: name.to_string(),
            });
            return Err(FieldError::Duplicate(name.to_string()));
        }

        self.form.add_invoice_field(&key, name, true);
        self.custom_fields.insert(key.clone(), name.to_string());
        tracing::debug!("Added custom invoice field '{}' as {}", name, key);
        Ok(key)
    }

    /// Ask to remove a field; nothing changes until [`Self::confirm_removal`]
    pub fn request_removal(&mut self, key: &str) -> Result<&PendingRemoval, FieldError> {
        let pending = if let Some(builtin) = builtin_field(key) {
            PendingRemoval {
                key: key.to_string(),
                label: builtin.label.to_string(),
                custom: false,
            }
        } else if let Some(label) = self.custom_fields.get(key) {
            PendingRemoval {
                key: key.to_string(),
                label: label.clone(),
                custom: true,
            }
        } else {
            return Err(FieldError::UnknownField(key.to_string()));
        };

        let pending = self.pending.insert(pending);
        Ok(&*pending)
    }

    /// Carry out the pending removal
    pub fn confirm_removal(&mut self) -> Result<PendingRemoval, FieldError> {
        let pending = self.pending.take().ok_or(FieldError::NothingPending)?;

        if pending.custom {
            self.custom_fields.remove(&pending.key);
            self.form.remove_invoice_field(&pending.key);
        } else {
            self.form.write(
                &FormField::InvoiceField(pending.key.clone()),
                FieldValue::Checked(false),
            );
        }

        tracing::debug!("Removed invoice field {}", pending.key);
        Ok(pending)
    }

    /// Drop the pending removal without changing anything
    pub fn cancel_removal(&mut self) -> Option<PendingRemoval> {
        self.pending.take()
    }

    fn read_text(&self, field: &FormField) -> Option<String> {
        self.form
            .read(field)
            .and_then(|v| v.as_text().map(str::to_string))
    }

    fn read_checked(&self, key: &str) -> Option<bool> {
        self.form
            .read(&FormField::InvoiceField(key.to_string()))
            .and_then(|v| v.as_checked())
    }
}
