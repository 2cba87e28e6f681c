pub mod error;
pub mod logger;
pub mod pace;
pub mod validation;
