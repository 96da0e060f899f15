use std::collections::BTreeMap;

use shared::{PartKey, PartKind, PartMap, ToothId};

/// Per-part selection flags. Parts never touched have no entry and read as unselected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    flags: PartMap<bool>,
}

impl SelectionState {
    pub fn is_selected(&self, key: PartKey) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Flip the flag and return the new value. The entry is kept even when it becomes false.
    pub fn toggle(&mut self, key: PartKey) -> bool {
        let next = !self.is_selected(key);
        self.flags.insert(key, next);
        next
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }

    /// Parts currently selected
    pub fn selected_count(&self) -> usize {
        self.flags.iter().filter(|(_, selected)| **selected).count()
    }

    /// Selected parts grouped by tooth, teeth with nothing selected omitted
    pub fn by_tooth(&self) -> BTreeMap<ToothId, Vec<PartKind>> {
        let mut out: BTreeMap<ToothId, Vec<PartKind>> = BTreeMap::new();
        for (key, selected) in self.flags.iter() {
            if *selected {
                out.entry(key.tooth).or_default().push(key.kind);
            }
        }
        out
    }

    pub fn snapshot(&self) -> PartMap<bool> {
        self.flags.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: u8, kind: PartKind) -> PartKey {
        PartKey::new(ToothId::new(code).unwrap(), kind)
    }

    #[test]
    fn test_toggle_keeps_false_entry() {
        let mut sel = SelectionState::default();
        let k = key(11, PartKind::Crown);
        assert!(sel.toggle(k));
        assert!(!sel.toggle(k));
        assert_eq!(sel.snapshot().get(k), Some(&false));
        assert_eq!(sel.selected_count(), 0);
    }

    #[test]
    fn test_by_tooth_groups_selected_only() {
        let mut sel = SelectionState::default();
        sel.toggle(key(11, PartKind::Crown));
        sel.toggle(key(11, PartKind::Root));
        sel.toggle(key(21, PartKind::Root));
        sel.toggle(key(21, PartKind::Root));

        let grouped = sel.by_tooth();
        assert_eq!(grouped.len(), 1);
        assert_eq!(
            grouped[&ToothId::new(11).unwrap()],
            vec![PartKind::Crown, PartKind::Root]
        );
    }

    #[test]
    fn test_clear() {
        let mut sel = SelectionState::default();
        sel.toggle(key(48, PartKind::Crown));
        sel.clear();
        assert!(sel.snapshot().is_empty());
    }
}
