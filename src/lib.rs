//! Classpatch - selective class hot-patching for deployed jars
//!
//! Classpatch swaps a subset of compiled `.class` artifacts (those whose
//! source files changed) into a jar that is already deployed locally or on a
//! remote host, without a full rebuild/redeploy cycle. The first patch run
//! preserves a pristine backup of the destination jar; every later run
//! patches against that same baseline, and `restore` puts the original jar
//! back.

pub mod archive;
pub mod config;
pub mod destination;
pub mod error;
pub mod mapper;
pub mod merge;
pub mod overlay;
pub mod restore;
pub mod staging;
pub mod transport;

// Re-exports for convenience
pub use config::Config;
pub use destination::Destination;
pub use error::{PatchError, PatchResult};
pub use mapper::map_sources;
pub use merge::run_merge;
pub use overlay::OverlayBuilder;
pub use restore::run_restore;
pub use staging::StagingArea;
pub use transport::deliver;
