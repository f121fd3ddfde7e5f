//! Export functionality for bookkeeping.

mod ledger;

pub use ledger::*;
