//! Shared UI components.

pub mod notice_banner;
