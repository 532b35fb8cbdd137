//! UI components for Ledgerdesk

pub mod colors;
pub mod company_panel;
pub mod custom_field;
pub mod header;
pub mod toggle;
