//! Two-slot compare selection

use serde::{Deserialize, Serialize};

/// Whether card activation records selections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareMode {
    #[default]
    Browsing,
    Comparing,
}

impl CompareMode {
    pub fn is_comparing(self) -> bool {
        self == CompareMode::Comparing
    }
}

/// Names picked for comparison. `slot1` always fills before `slot2`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPair {
    pub slot1: Option<String>,
    pub slot2: Option<String>,
}

impl SelectionPair {
    /// The pair after selecting `name`: first empty slot wins, a full pair is unchanged.
    ///
    /// The same name may occupy both slots.
    pub fn with_selection(&self, name: &str) -> SelectionPair {
        match (&self.slot1, &self.slot2) {
            (None, _) => SelectionPair {
                slot1: Some(name.to_string()),
                slot2: self.slot2.clone(),
            },
            (Some(_), None) => SelectionPair {
                slot1: self.slot1.clone(),
                slot2: Some(name.to_string()),
            },
            (Some(_), Some(_)) => self.clone(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.slot1.is_some() && self.slot2.is_some()
    }

    pub fn filled(&self) -> usize {
        usize::from(self.slot1.is_some()) + usize::from(self.slot2.is_some())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slot1.as_deref() == Some(name) || self.slot2.as_deref() == Some(name)
    }

    /// Both names, only once the pair is complete.
    pub fn both(&self) -> Option<(&str, &str)> {
        match (self.slot1.as_deref(), self.slot2.as_deref()) {
            (Some(first), Some(second)) => Some((first, second)),
            _ => None,
        }
    }
}

/// Card activation: records `name` while comparing, otherwise leaves the pair alone.
pub fn activate(mode: CompareMode, pair: &SelectionPair, name: &str) -> SelectionPair {
    match mode {
        CompareMode::Browsing => pair.clone(),
        CompareMode::Comparing => pair.with_selection(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(slot1: Option<&str>, slot2: Option<&str>) -> SelectionPair {
        SelectionPair {
            slot1: slot1.map(str::to_string),
            slot2: slot2.map(str::to_string),
        }
    }

    #[test]
    fn fills_first_empty_slot_then_stops() {
        let mode = CompareMode::Comparing;
        let first = activate(mode, &SelectionPair::default(), "Pikachu");
        assert_eq!(first, pair(Some("Pikachu"), None));
        let second = activate(mode, &first, "Charmander");
        assert_eq!(second, pair(Some("Pikachu"), Some("Charmander")));
        let third = activate(mode, &second, "Squirtle");
        assert_eq!(third, second);
    }

    #[test]
    fn browsing_never_records() {
        let start = SelectionPair::default();
        assert_eq!(activate(CompareMode::Browsing, &start, "Pikachu"), start);
    }

    #[test]
    fn same_name_can_fill_both_slots() {
        let mode = CompareMode::Comparing;
        let once = activate(mode, &SelectionPair::default(), "Eevee");
        let twice = activate(mode, &once, "Eevee");
        assert_eq!(twice.both(), Some(("Eevee", "Eevee")));
    }

    #[test]
    fn both_requires_complete_pair() {
        assert_eq!(pair(Some("Pikachu"), None).both(), None);
        assert_eq!(SelectionPair::default().both(), None);
        assert_eq!(
            pair(Some("Pikachu"), Some("Onix")).both(),
            Some(("Pikachu", "Onix"))
        );
    }

    #[test]
    fn membership_and_count() {
        let partial = pair(Some("Pikachu"), None);
        assert!(partial.contains("Pikachu"));
        assert!(!partial.contains("Onix"));
        assert_eq!(partial.filled(), 1);
        assert!(!partial.is_full());
    }
}
