//! Decomposition of viewer image locators.
//!
//! The imaging viewer addresses a series as `project/subject/experiment/scan`.
//! The string is consumed opaquely: no escaping, no validation, and a `/` inside a
//! segment value is indistinguishable from a boundary.
use serde::{Deserialize, Serialize};

/// Positional 4-part view of a locator.
///
/// | field        | imaging meaning |
/// |--------------|-----------------|
/// | `collection` | project         |
/// | `entity`     | subject         |
/// | `sub_entity` | experiment      |
/// | `item`       | scan            |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressingTuple {
    pub collection: String,
    pub entity: String,
    pub sub_entity: String,
    pub item: String,
}

impl AddressingTuple {
    /// Split `locator` on `/`.
    ///
    /// Missing trailing positions become empty strings; segments past the fourth are dropped.
    pub fn parse(locator: &str) -> Self {
        let mut parts = locator.split('/');
        let mut next = || parts.next().unwrap_or_default().to_string();

        Self {
            collection: next(),
            entity: next(),
            sub_entity: next(),
            item: next(),
        }
    }
}

/// Final segment of a locator (the whole string when it has no `/`).
pub fn last_segment(locator: &str) -> &str {
    locator.rsplit('/').next().unwrap_or(locator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_locator() {
        let t = AddressingTuple::parse("ProjA/Subj1/Exp1/Scan9");
        assert_eq!(t.collection, "ProjA");
        assert_eq!(t.entity, "Subj1");
        assert_eq!(t.sub_entity, "Exp1");
        assert_eq!(t.item, "Scan9");
    }

    #[test]
    fn short_locators_pad_with_empty() {
        let t = AddressingTuple::parse("ProjA/Subj1");
        assert_eq!(t.collection, "ProjA");
        assert_eq!(t.entity, "Subj1");
        assert_eq!(t.sub_entity, "");
        assert_eq!(t.item, "");

        assert_eq!(AddressingTuple::parse(""), AddressingTuple::default());
    }

    #[test]
    fn long_locators_drop_tail() {
        let t = AddressingTuple::parse("a/b/c/d/e/f");
        assert_eq!(t.item, "d");
    }

    #[test]
    fn empty_segments_are_kept_positional() {
        let t = AddressingTuple::parse("a//c/");
        assert_eq!(t.entity, "");
        assert_eq!(t.sub_entity, "c");
        assert_eq!(t.item, "");
    }

    #[test]
    fn last_segment_of_locator() {
        assert_eq!(last_segment("prod/XNAT_S0001/XNAT_E0001/5334"), "5334");
        assert_eq!(last_segment("5334"), "5334");
        assert_eq!(last_segment("a/b/"), "");
        assert_eq!(last_segment(""), "");
    }
}
