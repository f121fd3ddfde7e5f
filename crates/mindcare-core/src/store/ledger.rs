//! Income and expense ledger.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{next_timestamp_id, StoreResult};
use crate::models::{Transaction, TransactionForm, TransactionKind, ValidationError};

/// Which transactions a listing shows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, uniffi::Enum)]
#[serde(rename_all = "kebab-case")]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    fn accepts(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Income => kind == TransactionKind::Income,
            KindFilter::Expense => kind == TransactionKind::Expense,
        }
    }
}

/// Derived ledger totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
}

/// Transactions, newest first.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    last_id: i64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form and prepend a new transaction. Returns its id.
    ///
    /// The ledger is untouched when validation fails or when the amount
    /// would push its kind's running total past `Decimal::MAX`.
    pub fn add(&mut self, form: &TransactionForm, today: NaiveDate) -> StoreResult<String> {
        let fields = form.validate(today)?;
        self.check_headroom(fields.kind, fields.amount, &form.amount)?;

        let mut id = next_timestamp_id(&mut self.last_id);
        while self.get(&id).is_some() {
            id = next_timestamp_id(&mut self.last_id);
        }

        info!(
            transaction_id = %id,
            kind = fields.kind.as_str(),
            amount = %fields.amount,
            "Added transaction"
        );
        self.transactions.insert(
            0,
            Transaction {
                id: id.clone(),
                kind: fields.kind,
                amount: fields.amount,
                description: fields.description,
                category: fields.category,
                date: fields.date,
            },
        );
        Ok(id)
    }

    /// Prepend a pre-built transaction.
    pub fn insert(&mut self, transaction: Transaction) -> StoreResult<()> {
        if self.get(&transaction.id).is_some() {
            return Err(super::StoreError::DuplicateId(transaction.id));
        }
        self.check_headroom(
            transaction.kind,
            transaction.amount,
            &transaction.amount.to_string(),
        )?;
        self.transactions.insert(0, transaction);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// All transactions, newest first.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions matching the kind filter and, if given, `(year, month)`.
    pub fn filtered(&self, filter: KindFilter, month: Option<(i32, u32)>) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.accepts(t.kind))
            .filter(|t| match month {
                Some((year, month)) => t.date.year() == year && t.date.month() == month,
                None => true,
            })
            .collect()
    }

    fn check_headroom(
        &self,
        kind: TransactionKind,
        amount: Decimal,
        input: &str,
    ) -> StoreResult<()> {
        match self.sum(kind).checked_add(amount) {
            Some(_) => Ok(()),
            None => {
                warn!(
                    kind = kind.as_str(),
                    amount = %amount,
                    "Rejected transaction: total overflow"
                );
                Err(ValidationError::InvalidAmount(input.to_string()).into())
            }
        }
    }

    // Saturates instead of panicking.
    fn sum(&self, kind: TransactionKind) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .fold(Decimal::ZERO, |acc, t| saturating_add(acc, t.amount))
    }

    pub fn total_income(&self) -> Decimal {
        self.sum(TransactionKind::Income)
    }

    pub fn total_expenses(&self) -> Decimal {
        self.sum(TransactionKind::Expense)
    }

    pub fn net_profit(&self) -> Decimal {
        self.totals().net_profit
    }

    /// Income, expenses and net, recomputed from the current entries.
    pub fn totals(&self) -> LedgerTotals {
        let total_income = self.total_income();
        let total_expenses = self.total_expenses();
        LedgerTotals {
            total_income,
            total_expenses,
            net_profit: total_income
                .checked_sub(total_expenses)
                .unwrap_or(Decimal::MIN),
        }
    }

    /// Income per `(year, month)`, oldest month first.
    pub fn monthly_income(&self) -> Vec<((i32, u32), Decimal)> {
        let mut months: std::collections::BTreeMap<(i32, u32), Decimal> = Default::default();
        for t in self
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
        {
            let total = months.entry((t.date.year(), t.date.month())).or_default();
            *total = saturating_add(*total, t.amount);
        }
        months.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}
