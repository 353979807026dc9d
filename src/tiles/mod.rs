pub mod calculator;
pub mod layout;
pub mod source;
