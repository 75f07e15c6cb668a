pub mod error;
pub mod nearby;
