pub mod student;
pub mod validation;
