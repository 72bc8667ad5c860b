//! Types shared between the sportsdesk server and its clients.

pub mod model;
pub mod requests;
