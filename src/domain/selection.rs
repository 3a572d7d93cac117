use std::collections::BTreeSet;

/// The set of materials picked for the current quiz draft. Toggling is a
/// symmetric-difference update, so a double toggle restores the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialSelection {
    ids: BTreeSet<String>,
}

impl MaterialSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the material is selected after the toggle.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

impl FromIterator<String> for MaterialSelection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
