//! DTO modules that bridge services with templates.

pub mod customer;
pub mod format;
pub mod loans;
pub mod repayments;
