//! Application pages.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod password_reset;
pub mod register;
pub mod unauthorized;
