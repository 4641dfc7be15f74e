/// Monotonic, prefix-formatted identifier source owned by a single registry.
///
/// Counters start at 1 and are never reset, so an id is never handed out twice for the lifetime
/// of the registry. Values are zero-padded to four digits (`APP0001`); past `9999` the width
/// simply grows.
#[derive(Debug, Clone)]
pub(crate) struct IdSequence {
    prefix: &'static str,
    next: u32,
}

impl IdSequence {
    pub(crate) const fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    pub(crate) fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("{}{id:04}", self.prefix)
    }
}
