use std::collections::BTreeSet;
use std::fmt;

/// An immutable set of version identifiers ("monikers").
///
/// `MonikerList::default()` is the empty list, used both for "no version
/// restriction" and as the sentinel written back onto children whose
/// moniker set doesn't narrow their parent's (§4.7 step 3, §3-I4).
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct MonikerList(BTreeSet<String>);

impl MonikerList {
    pub fn new(monikers: impl IntoIterator<Item = String>) -> Self {
        Self(monikers.into_iter().collect())
    }

    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Union of `self` with `other`.
    pub fn union(&self, other: &MonikerList) -> MonikerList {
        MonikerList(self.0.union(&other.0).cloned().collect())
    }

    pub fn union_all<'a>(lists: impl IntoIterator<Item = &'a MonikerList>) -> MonikerList {
        let mut acc = BTreeSet::new();
        for list in lists {
            acc.extend(list.0.iter().cloned());
        }
        MonikerList(acc)
    }
}

impl fmt::Display for MonikerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().cloned().collect::<Vec<_>>().join(", "))
    }
}

impl FromIterator<String> for MonikerList {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        MonikerList(iter.into_iter().collect())
    }
}
