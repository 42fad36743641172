use crate::enumerate::Enumerator;
use crate::error::RecordError;
use lineage_domain::config::{EnumerationConfig, KeyOrder};

/// Builder for [`Enumerator`], starting from the default settings.
#[derive(Debug, Clone, Default)]
pub struct EnumeratorBuilder {
    config: EnumerationConfig,
}

impl EnumeratorBuilder {
    #[must_use = "The builder must be built before it can enumerate anything."]
    pub const fn order(mut self, order: KeyOrder) -> Self {
        self.config.order = order;
        self
    }

    /// Maximum number of templates walked above a record. Must be non-zero.
    #[must_use = "The builder must be built before it can enumerate anything."]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Also yield properties that are not enumerable.
    #[must_use = "The builder must be built before it can enumerate anything."]
    pub const fn include_hidden(mut self, enabled: bool) -> Self {
        self.config.include_hidden = enabled;
        self
    }

    /// # Errors
    /// Returns [`RecordError::InvalidConfiguration`] when the maximum depth is zero.
    pub fn build(self) -> Result<Enumerator, RecordError> {
        Enumerator::from_config(&self.config)
    }
}
