//! Facade crate for Lineage.
//! Re-exports the domain models, the configuration kernel and the record library.
//! Keep this crate thin: it should compose other crates, not implement record logic.
//!
//! ## Usage
//! - Load a [`LineageConfig`](domain::config::LineageConfig) with
//!   [`kernel::config::ConfigLoader`].
//! - Turn its `enumeration` section into an [`Enumerator`](record::Enumerator) with
//!   [`enumerator`].

pub use lineage_domain as domain;
pub use lineage_kernel as kernel;
pub use lineage_record as record;

use lineage_domain::config::LineageConfig;
use lineage_record::{Enumerator, RecordError};

pub mod prelude {
    pub use lineage_domain::config::LineageConfig;
    pub use lineage_domain::document::DocumentSpec;
    pub use lineage_record::prelude::*;
}

/// Builds the enumerator described by the `enumeration` section of `config`.
///
/// # Errors
/// Returns [`RecordError::InvalidConfiguration`] for unusable settings.
///
/// # Example
/// ```rust
/// use lineage::prelude::*;
///
/// let mut config = LineageConfig::default();
/// config.enumeration.order = KeyOrder::IndexFirst;
///
/// let enumerator = lineage::enumerator(&config).unwrap();
/// assert_eq!(enumerator.config().order, KeyOrder::IndexFirst);
/// ```
pub fn enumerator(config: &LineageConfig) -> Result<Enumerator, RecordError> {
    Enumerator::from_config(&config.enumeration)
}
