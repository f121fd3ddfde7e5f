//! Domain models for the MindCare clinic.

mod appointment;
mod patient;
mod records;
mod session;
mod transaction;
mod validation;

pub use appointment::*;
pub use patient::*;
pub use records::*;
pub use session::*;
pub use transaction::*;
pub use validation::*;
