// src/attr_usage.rs

use std::borrow::Cow;
use std::fmt;

const HASH_NAMES: [&str; 15] = [
    "Hash1", "Hash2", "Hash3", "Hash4", "Hash5", "Hash6", "Hash7", "Hash8", "Hash9", "Hash10",
    "Hash11", "Hash12", "Hash13", "Hash14", "Hash15",
];

const REMARK_NAMES: [&str; 16] = [
    "Remark", "Remark1", "Remark2", "Remark3", "Remark4", "Remark5", "Remark6", "Remark7",
    "Remark8", "Remark9", "Remark10", "Remark11", "Remark12", "Remark13", "Remark14", "Remark15",
];

/// Purpose of a transaction attribute, keyed by its one-byte usage code.
///
/// Codes outside the assigned ranges map to [`AttrUsage::Unknown`] so that
/// callers have to handle them explicitly. Every value of this type encodes
/// to a code that decodes back to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrUsage {
    ContractHash,
    Ecdh02,
    Ecdh03,
    Script,
    Vote,
    CertUrl,
    DescriptionUrl,
    Description,
    /// `Hash1` through `Hash15` (codes `0xa1..=0xaf`).
    Hash(HashSlot),
    /// `Remark` and `Remark1` through `Remark15` (codes `0xf0..=0xff`).
    Remark(RemarkSlot),
    Unknown(UnassignedCode),
}

/// Index of a `HashN` usage, in `1..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashSlot(u8);

impl HashSlot {
    pub const fn new(index: u8) -> Option<Self> {
        match index {
            1..=15 => Some(Self(index)),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Index of a `RemarkN` usage, in `0..=15`; index 0 is the bare `Remark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemarkSlot(u8);

impl RemarkSlot {
    pub const fn new(index: u8) -> Option<Self> {
        match index {
            0..=15 => Some(Self(index)),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// A usage code with no assigned meaning. Only produced by decoding a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnassignedCode(u8);

impl UnassignedCode {
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }
}

impl AttrUsage {
    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, AttrUsage::Unknown(_))
    }

    /// Canonical name, e.g. `"ECDH02"`, `"Hash7"`, `"Remark"`, `"Remark12"`.
    ///
    /// Unassigned codes render as `Unknown(0x..)`.
    pub fn name(&self) -> Cow<'static, str> {
        let name = match self {
            AttrUsage::ContractHash => "ContractHash",
            AttrUsage::Ecdh02 => "ECDH02",
            AttrUsage::Ecdh03 => "ECDH03",
            AttrUsage::Script => "Script",
            AttrUsage::Vote => "Vote",
            AttrUsage::CertUrl => "CertURL",
            AttrUsage::DescriptionUrl => "DescriptionURL",
            AttrUsage::Description => "Description",
            AttrUsage::Hash(slot) => HASH_NAMES[usize::from(slot.0 - 1)],
            AttrUsage::Remark(slot) => REMARK_NAMES[usize::from(slot.0)],
            AttrUsage::Unknown(code) => return Cow::Owned(format!("Unknown(0x{:02x})", code.0)),
        };
        Cow::Borrowed(name)
    }
}

impl From<u8> for AttrUsage {
    fn from(code: u8) -> Self {
        match code {
            0x00 => AttrUsage::ContractHash,
            0x02 => AttrUsage::Ecdh02,
            0x03 => AttrUsage::Ecdh03,
            0x20 => AttrUsage::Script,
            0x30 => AttrUsage::Vote,
            0x80 => AttrUsage::CertUrl,
            0x81 => AttrUsage::DescriptionUrl,
            0x90 => AttrUsage::Description,
            0xa1..=0xaf => AttrUsage::Hash(HashSlot(code & 0x0f)),
            0xf0..=0xff => AttrUsage::Remark(RemarkSlot(code & 0x0f)),
            other => AttrUsage::Unknown(UnassignedCode(other)),
        }
    }
}

impl From<AttrUsage> for u8 {
    fn from(usage: AttrUsage) -> Self {
        match usage {
            AttrUsage::ContractHash => 0x00,
            AttrUsage::Ecdh02 => 0x02,
            AttrUsage::Ecdh03 => 0x03,
            AttrUsage::Script => 0x20,
            AttrUsage::Vote => 0x30,
            AttrUsage::CertUrl => 0x80,
            AttrUsage::DescriptionUrl => 0x81,
            AttrUsage::Description => 0x90,
            AttrUsage::Hash(slot) => 0xa0 | slot.0,
            AttrUsage::Remark(slot) => 0xf0 | slot.0,
            AttrUsage::Unknown(code) => code.0,
        }
    }
}

impl fmt::Display for AttrUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(AttrUsage::from(0x00).name(), "ContractHash");
        assert_eq!(AttrUsage::from(0x02).name(), "ECDH02");
        assert_eq!(AttrUsage::from(0x81).name(), "DescriptionURL");
        assert_eq!(AttrUsage::from(0xa1).name(), "Hash1");
        assert_eq!(AttrUsage::from(0xa7).name(), "Hash7");
        assert_eq!(AttrUsage::from(0xaf).name(), "Hash15");
        assert_eq!(AttrUsage::from(0xf0).name(), "Remark");
        assert_eq!(AttrUsage::from(0xfc).name(), "Remark12");
        assert_eq!(AttrUsage::from(0xb0).name(), "Unknown(0xb0)");
    }

    #[test]
    fn display_matches_name() {
        for code in 0..=u8::MAX {
            let usage = AttrUsage::from(code);
            assert_eq!(usage.to_string(), usage.name());
        }
    }

    #[test]
    fn unassigned_codes_are_unknown() {
        for code in [0x01u8, 0x04, 0x21, 0xa0, 0xb0, 0xef] {
            let usage = AttrUsage::from(code);
            assert!(matches!(usage, AttrUsage::Unknown(c) if c.code() == code));
            assert!(!usage.is_known());
        }
    }

    #[test]
    fn slots_reject_out_of_range_indices() {
        assert_eq!(HashSlot::new(0), None);
        assert_eq!(HashSlot::new(16), None);
        assert_eq!(HashSlot::new(15).map(HashSlot::index), Some(15));
        assert_eq!(RemarkSlot::new(16), None);
        assert_eq!(RemarkSlot::new(0).map(RemarkSlot::index), Some(0));
    }

    #[test]
    fn codes_round_trip() {
        for code in 0..=u8::MAX {
            assert_eq!(u8::from(AttrUsage::from(code)), code);
        }
    }

    #[test]
    fn every_constructible_usage_round_trips() {
        let mut usages = vec![
            AttrUsage::ContractHash,
            AttrUsage::Ecdh02,
            AttrUsage::Ecdh03,
            AttrUsage::Script,
            AttrUsage::Vote,
            AttrUsage::CertUrl,
            AttrUsage::DescriptionUrl,
            AttrUsage::Description,
        ];
        usages.extend((0..=u8::MAX).filter_map(HashSlot::new).map(AttrUsage::Hash));
        usages.extend((0..=u8::MAX).filter_map(RemarkSlot::new).map(AttrUsage::Remark));
        usages.extend(
            (0..=u8::MAX)
                .map(AttrUsage::from)
                .filter(|usage| !usage.is_known()),
        );

        assert_eq!(usages.len(), 256);
        for usage in usages {
            assert_eq!(AttrUsage::from(u8::from(usage)), usage, "{usage}");
        }
    }
}
