/// Byte accounting against a fixed ceiling. A ceiling of zero means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ByteBudget {
    used: u64,
    max: u64,
}

impl ByteBudget {
    pub(crate) fn new(max: u64) -> Self {
        ByteBudget { used: 0, max }
    }

    pub(crate) fn used(&self) -> u64 {
        self.used
    }

    pub(crate) fn max(&self) -> u64 {
        self.max
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        self.max == 0
    }

    pub(crate) fn charge(&mut self, bytes: u64) {
        self.used = self.used.saturating_add(bytes);
    }

    pub(crate) fn release(&mut self, bytes: u64) {
        debug_assert!(
            bytes <= self.used,
            "releasing {} bytes with only {} in use",
            bytes,
            self.used
        );
        self.used = self.used.saturating_sub(bytes);
    }

    pub(crate) fn is_exceeded(&self) -> bool {
        !self.is_unbounded() && self.used > self.max
    }

    /// Whether a single charge of `bytes` could never fit, even in an empty cache.
    pub(crate) fn exceeds_ceiling(&self, bytes: u64) -> bool {
        !self.is_unbounded() && bytes > self.max
    }

    pub(crate) fn reset(&mut self) {
        self.used = 0;
    }
}
