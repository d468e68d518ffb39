//! Byte-slice rules.

use crate::foundation::ValidationError;

crate::rule! {
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinBytes { min: usize } for [u8];
    check(self, input) { input.len() >= self.min }
    fail(self, input) { ValidationError::min_length(self.min, input.len()) }
    fn min_bytes(min: usize);
}

crate::rule! {
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxBytes { max: usize } for [u8];
    check(self, input) { input.len() <= self.max }
    fail(self, input) { ValidationError::max_length(self.max, input.len()) }
    fn max_bytes(max: usize);
}

crate::rule! {
    /// The input must contain `needle` as a contiguous run. An empty needle
    /// always matches.
    pub ContainsBytes { needle: Vec<u8> } for [u8];
    check(self, input) {
        self.needle.is_empty() || input.windows(self.needle.len()).any(|w| w == self.needle.as_slice())
    }
    fail(self, input) { ValidationError::new("contains_bytes", "must contain the byte sequence") }
    new(needle: impl Into<Vec<u8>>) { Self { needle: needle.into() } }
    fn contains_bytes(needle: impl Into<Vec<u8>>);
}
