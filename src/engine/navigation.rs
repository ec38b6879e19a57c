//! Browser-style navigation history over rendered members.

/// One visited position in the rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    /// Canonical full name of the containing type.
    pub type_name: String,
    /// The member name as rendered.
    pub member_name: String,
    /// Canonical signature identifying the member among overloads.
    pub canonical_signature: String,
    /// Line offset where this member's rendering begins in the view.
    pub rendered_line_offset: usize,
}

/// Linear back/forward history with browser semantics.
///
/// Pushing while positioned mid-history truncates the forward tail, the same way a
/// browser forgets forward pages after navigating somewhere new.
#[derive(Debug, Default)]
pub struct NavigationHistory {
    entries: Vec<NavigationEntry>,
    position: Option<usize>,
}

impl NavigationHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly rendered member as the current position.
    ///
    /// Re-pushing the entry already current is a no-op, so refreshes do not pad the
    /// history with duplicates.
    pub fn push(&mut self, entry: NavigationEntry) {
        if self.current() == Some(&entry) {
            return;
        }
        if let Some(position) = self.position {
            self.entries.truncate(position + 1);
        }
        self.entries.push(entry);
        self.position = Some(self.entries.len() - 1);
    }

    /// The entry at the current position, if any.
    #[must_use]
    pub fn current(&self) -> Option<&NavigationEntry> {
        self.position.map(|position| &self.entries[position])
    }

    /// Steps back one entry, returning the new current entry.
    pub fn back(&mut self) -> Option<&NavigationEntry> {
        let position = self.position?;
        if position == 0 {
            return None;
        }
        self.position = Some(position - 1);
        self.current()
    }

    /// Steps forward one entry, returning the new current entry.
    pub fn forward(&mut self) -> Option<&NavigationEntry> {
        let position = self.position?;
        if position + 1 >= self.entries.len() {
            return None;
        }
        self.position = Some(position + 1);
        self.current()
    }

    /// Whether a back step is available.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.position.is_some_and(|position| position > 0)
    }

    /// Whether a forward step is available.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.position
            .is_some_and(|position| position + 1 < self.entries.len())
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = None;
    }
}
