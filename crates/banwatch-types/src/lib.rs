//! Shared types for the banwatch ban-check bot

pub mod account;
pub mod errors;
pub mod language;
pub mod region;

pub use account::{AccountRecord, SuspensionPeriod, NOT_AVAILABLE};
pub use errors::LookupError;
pub use language::{Language, UnsupportedLanguage};
pub use region::{find_region, region_codes, region_display_name, Region, REGIONS};
