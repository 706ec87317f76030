//! Domain types for a checkout transaction: payment descriptions, the step
//! events a flow produces, and the contracts of the external collaborators.

pub mod payment;
pub mod ports;
pub mod step;
