use std::collections::BTreeMap;

use shared::{MissingFlag, PartKey, ToothId};

/// Missing-part flags per tooth; absent means `MissingFlag::None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingState {
    flags: BTreeMap<ToothId, MissingFlag>,
}

impl MissingState {
    pub fn get(&self, tooth: ToothId) -> MissingFlag {
        self.flags.get(&tooth).copied().unwrap_or_default()
    }

    pub fn set(&mut self, tooth: ToothId, flag: MissingFlag) {
        if flag == MissingFlag::None {
            self.flags.remove(&tooth);
        } else {
            self.flags.insert(tooth, flag);
        }
    }

    pub fn hides(&self, key: PartKey) -> bool {
        self.get(key.tooth).hides(key.kind)
    }

    pub fn snapshot(&self) -> BTreeMap<ToothId, MissingFlag> {
        self.flags.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PartKind;

    #[test]
    fn test_visibility_table() {
        let tooth = ToothId::new(26).unwrap();
        let crown = PartKey::new(tooth, PartKind::Crown);
        let root = PartKey::new(tooth, PartKind::Root);
        let mut missing = MissingState::default();

        assert!(!missing.hides(crown) && !missing.hides(root));

        missing.set(tooth, MissingFlag::Crown);
        assert!(missing.hides(crown) && !missing.hides(root));

        missing.set(tooth, MissingFlag::Root);
        assert!(!missing.hides(crown) && missing.hides(root));

        missing.set(tooth, MissingFlag::Entire);
        assert!(missing.hides(crown) && missing.hides(root));

        missing.set(tooth, MissingFlag::None);
        assert!(missing.snapshot().is_empty());
    }
}
