//! Ledger transaction models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{coerce_amount, parse_date, require, ValidationResult};

/// Suggested categories offered by the entry form.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Session Fee",
    "Equipment",
    "Software",
    "Rent",
    "Utilities",
    "Other",
];

/// Income or expense.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// A ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

/// Raw entry form input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: String,
    pub description: String,
    pub category: String,
    /// Blank means today
    pub date: String,
}

impl TransactionForm {
    /// A fresh form: income, the default category, dated today.
    pub fn new(default_category: &str, today: NaiveDate) -> Self {
        Self {
            kind: TransactionKind::Income,
            amount: String::new(),
            description: String::new(),
            category: default_category.to_string(),
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Validate required fields and coerce the amount.
    pub fn validate(&self, today: NaiveDate) -> ValidationResult<TransactionFields> {
        let amount = coerce_amount(&self.amount)?;
        let description = require(&self.description, "description")?.to_string();
        let category = require(&self.category, "category")?.to_string();
        let date = if self.date.trim().is_empty() {
            today
        } else {
            parse_date(&self.date)?
        };

        Ok(TransactionFields {
            kind: self.kind,
            amount,
            description,
            category,
            date,
        })
    }
}

/// Validated transaction data, without an id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_new_form_defaults() {
        let form = TransactionForm::new("Session Fee", today());
        assert_eq!(form.kind, TransactionKind::Income);
        assert_eq!(form.category, "Session Fee");
        assert_eq!(form.date, "2024-02-01");
        assert!(form.amount.is_empty());
    }

    #[test]
    fn test_validate_expense() {
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: "75.50".into(),
            description: "Printer".into(),
            category: "Equipment".into(),
            date: "2024-02-01".into(),
        };
        let fields = form.validate(today()).unwrap();
        assert_eq!(fields.amount, Decimal::new(7550, 2));
        assert_eq!(fields.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_validate_missing_description() {
        let mut form = TransactionForm::new("Rent", today());
        form.amount = "100".into();
        assert_eq!(
            form.validate(today()),
            Err(ValidationError::Required("description"))
        );
    }

    #[test]
    fn test_blank_date_defaults_to_today() {
        let mut form = TransactionForm::new("Rent", today());
        form.amount = "100".into();
        form.description = "February rent".into();
        form.date.clear();
        assert_eq!(form.validate(today()).unwrap().date, today());
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let tx = Transaction {
            id: "1".into(),
            kind: TransactionKind::Expense,
            amount: Decimal::new(50, 0),
            description: "Medical supplies".into(),
            category: "Equipment".into(),
            date: today(),
        };
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
    }
}
