pub mod download;
pub mod flash;
pub mod reports;
pub mod students;
pub mod templates;
