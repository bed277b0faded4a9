use graph::LineRange;

/// Precomputed newline table over a file's bytes. `line_of` answers
/// byte→line queries in O(log N); spans stay byte-exact regardless of
/// the file's encoding.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
    line_count: usize,
}

impl LineIndex {
    pub fn new(bytes: &[u8]) -> Self {
        let newlines: Vec<usize> = bytes
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| (b == b'\n').then_some(i))
            .collect();
        let mut line_count = newlines.len();
        if bytes.last() != Some(&b'\n') {
            line_count += 1;
        }
        Self {
            newlines,
            line_count: line_count.max(1),
        }
    }

    /// 1-indexed line containing the byte at `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&n| n < offset) + 1
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Inclusive line span for a half-open byte range. The end line is
    /// taken from the last byte inside the range.
    pub fn range_of(&self, start_byte: usize, end_byte: usize) -> LineRange {
        LineRange(
            self.line_of(start_byte),
            self.line_of(end_byte.saturating_sub(1).max(start_byte)),
        )
    }
}
