/// Number of the capturing group that the next closing quote refers back to.
///
/// One counter spans a whole top-level compilation and is shared, by
/// `&mut`, with every fragment compiled inside it, so group numbers follow
/// the order in which groups appear in the final pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupCounter(usize);

impl GroupCounter {
    pub fn new() -> Self {
        GroupCounter(1)
    }

    pub fn current(&self) -> usize {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 1;
    }

    /// Return the current group number and move on to the next one.
    pub fn advance(&mut self) -> usize {
        let group = self.0;
        self.0 += 1;
        group
    }
}

impl Default for GroupCounter {
    fn default() -> Self {
        Self::new()
    }
}
