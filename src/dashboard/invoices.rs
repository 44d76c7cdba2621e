//! Invoice records shown on the dashboard

use crate::storage::{INVOICE_DATA_KEY, KeyValueStore, StorageResult};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One stored invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    pub name: String,
    /// Creation time, RFC 3339
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(default)]
    pub status: String,
}

impl Invoice {
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Invoices in storage order (oldest first)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceLedger {
    invoices: Vec<Invoice>,
}

impl InvoiceLedger {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self { invoices }
    }

    /// Load from `invoiceData`, falling back to sample invoices dated around `now`
    pub fn load(storage: &dyn KeyValueStore, now: DateTime<Utc>) -> Self {
        let raw = match storage.get(INVOICE_DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::sample(now),
            Err(e) => {
                tracing::warn!("Failed to read invoices: {}", e);
                return Self::sample(now);
            }
        };

        match serde_json::from_str::<Vec<Invoice>>(&raw) {
            Ok(invoices) => Self::new(invoices),
            Err(e) => {
                tracing::warn!("Stored invoices are malformed, showing samples: {}", e);
                Self::sample(now)
            }
        }
    }

    pub fn save(&self, storage: &dyn KeyValueStore) -> StorageResult<()> {
        let raw = serde_json::to_string(&self.invoices)?;
        storage.set(INVOICE_DATA_KEY, &raw)
    }

    /// Two placeholder invoices: one today, one yesterday
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self::new(vec![
            Invoice {
                id: 1,
                name: "Website Design".to_string(),
                date: now,
                amount: 15000.0,
                status: "paid".to_string(),
            },
            Invoice {
                id: 2,
                name: "SEO Services".to_string(),
                date: now - Duration::days(1),
                amount: 8000.0,
                status: "pending".to_string(),
            },
        ])
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn push(&mut self, invoice: Invoice) {
        self.invoices.push(invoice);
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.invoices.iter().map(|i| i.amount).sum()
    }

    /// The last `n` invoices, most recently added first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Invoice> {
        self.invoices.iter().rev().take(n)
    }

    /// Sum of the invoices dated on `day`
    pub fn total_on(&self, day: NaiveDate) -> f64 {
        self.invoices
            .iter()
            .filter(|i| i.day() == day)
            .map(|i| i.amount)
            .sum()
    }
}
