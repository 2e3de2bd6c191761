//! Candidate transitions of a facility-location solution.

/// A move on a facility-location solution.
///
/// Pure value type: it names the facilities involved and carries no
/// solution state, so it can be scored and committed against any solution
/// holding those facilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Update<V> {
    /// Open an unchosen facility.
    Add(V),
    /// Close a chosen facility.
    Remove(V),
    /// Open `to` and close `from` in one step.
    Swap {
        /// Chosen facility to close.
        from: V,
        /// Unchosen facility to open.
        to: V,
    },
}

impl<V> Update<V> {
    /// The facility this update opens, if any.
    pub fn opened(&self) -> Option<&V> {
        match self {
            Update::Add(v) | Update::Swap { to: v, .. } => Some(v),
            Update::Remove(_) => None,
        }
    }

    /// The facility this update closes, if any.
    pub fn closed(&self) -> Option<&V> {
        match self {
            Update::Remove(v) | Update::Swap { from: v, .. } => Some(v),
            Update::Add(_) => None,
        }
    }

    /// Every facility whose state the update changes.
    pub fn facilities(&self) -> Vec<&V> {
        self.opened().into_iter().chain(self.closed()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opened_closed() {
        let add = Update::Add(1);
        assert_eq!(add.opened(), Some(&1));
        assert_eq!(add.closed(), None);

        let swap = Update::Swap { from: 2, to: 5 };
        assert_eq!(swap.opened(), Some(&5));
        assert_eq!(swap.closed(), Some(&2));
        assert_eq!(swap.facilities(), vec![&5, &2]);
    }
}
