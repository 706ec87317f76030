pub mod card_validator;
pub mod simulated;
