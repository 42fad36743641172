use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Per-property attributes.
    ///
    /// A property that is not `ENUMERABLE` is skipped by enumeration but still
    /// shadows an inherited property of the same name. A property that is not
    /// `WRITABLE` rejects later assignments.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Attributes: u8 {
        const ENUMERABLE = 1 << 0;
        const WRITABLE = 1 << 1;

        const DEFAULT = Self::ENUMERABLE.bits() | Self::WRITABLE.bits();
    }
}

impl Attributes {
    #[must_use]
    pub const fn is_enumerable(self) -> bool {
        self.contains(Self::ENUMERABLE)
    }

    #[must_use]
    pub const fn is_writable(self) -> bool {
        self.contains(Self::WRITABLE)
    }

    /// Returns the same attributes with `ENUMERABLE` cleared.
    #[must_use]
    pub const fn hidden(self) -> Self {
        self.difference(Self::ENUMERABLE)
    }

    /// Returns the same attributes with `WRITABLE` cleared.
    #[must_use]
    pub const fn read_only(self) -> Self {
        self.difference(Self::WRITABLE)
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for Attributes {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for Attributes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}
