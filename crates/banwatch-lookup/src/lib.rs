//! Free Fire account lookup across regional endpoints.
//!
//! The lookup service is queried one region at a time, in a fixed order,
//! until a region answers with an account record. Per-region failures
//! (404, 5xx, transport errors, unrecognised bodies) never abort the scan;
//! only running out of regions surfaces as `LookupError::AccountNotFound`.

pub mod config;
pub mod resolver;
pub mod timestamp;

use std::future::Future;

use banwatch_types::{AccountRecord, LookupError};

pub use config::LookupConfig;
pub use resolver::RegionResolver;

/// Resolve a player id to an account record.
///
/// One trait, one operation. The command layer depends on this rather than
/// on `RegionResolver` so tests can substitute a canned lookup.
pub trait AccountLookup: Send + Sync + 'static {
    fn lookup(
        &self,
        player_id: &str,
    ) -> impl Future<Output = Result<AccountRecord, LookupError>> + Send;
}
