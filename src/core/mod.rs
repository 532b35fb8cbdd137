//! Core functionality: company settings, custom fields, translation and configuration

pub mod branding;
pub mod company;
pub mod config;
pub mod custom_field;
pub mod field;
pub mod i18n;
pub mod pointer;
