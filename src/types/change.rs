/// A single notification about the bookmark collection.
///
/// Mutations arrive bracketed: one `BeginBatch`, any number of `Insert`/`Delete`,
/// then one `EndBatch`. Positions are only meaningful to a listener that has
/// applied every earlier event of the same batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    BeginBatch,
    Insert(usize),
    Delete(usize),
    EndBatch,
}

impl ChangeEvent {
    pub fn is_mutation(&self) -> bool {
        matches!(self, ChangeEvent::Insert(_) | ChangeEvent::Delete(_))
    }
}
