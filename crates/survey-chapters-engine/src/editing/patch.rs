/// Result of applying a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    /// Question ids that changed, as `(old, new)` pairs in question order
    pub renumbered: Vec<(String, String)>,
    /// Ids (after renumbering) of questions whose conditional parent was removed
    pub orphaned: Vec<String>,
}

impl Patch {
    /// Whether the edit touched anything beyond the edited field itself
    pub fn is_structural(&self) -> bool {
        !self.renumbered.is_empty() || !self.orphaned.is_empty()
    }
}
