//! Application layer: the transaction flow and the adapters it drives.
//!
//! A [`flow::TransactionFlow`] turns one `TransactionRequest` into a lazy,
//! pull-driven stream of step events. The first poll resolves the payment
//! method to a handler in [`dispatch`], which composes the tokenization and
//! backend submission adapters into an ordered chain of steps.

pub mod dispatch;
pub mod flow;
pub mod submission;
pub mod tokenization;

pub use flow::{TransactionFlow, submit};
pub use tokenization::create_paygate_token;
