/* 📖 # Why a plain double loop instead of a smarter string algorithm?

The matcher slides a window of the pattern's length across the text and counts
mismatches, giving up on a window as soon as the count exceeds the budget. That is
O(n·m) in the worst case, with the early exit making typical inputs much cheaper.
Bitap or FFT-based approaches would be faster on adversarial inputs, but they are harder
to verify and the inputs this tool sees are short.

The first qualifying window wins, so the returned offset is always the smallest one.
*/

/// Integer form of "no window matched".
pub const NOT_FOUND: i64 = -1;

/// Number of mismatches a window may have by default.
pub const DEFAULT_MAX_MISMATCHES: usize = 1;

/// Finds the smallest offset where a window of the text differs from the pattern in at
/// most a fixed number of positions (bounded Hamming distance).
///
/// The matcher holds no state besides its budget, so it is `Copy` and can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlmostEqualMatcher {
    max_mismatches: usize,
}

impl AlmostEqualMatcher {
    /// Create a matcher that accepts windows with at most one substitution.
    pub fn new() -> Self {
        Self::with_max_mismatches(DEFAULT_MAX_MISMATCHES)
    }

    /// Create a matcher with a custom mismatch budget. A budget of zero is exact search.
    pub fn with_max_mismatches(max_mismatches: usize) -> Self {
        Self { max_mismatches }
    }

    pub fn max_mismatches(&self) -> usize {
        self.max_mismatches
    }

    /// Find the smallest offset `i` such that `text[i..i + pattern.len()]` differs from
    /// `pattern` in at most `max_mismatches` positions.
    ///
    /// An empty pattern matches at offset 0, including against an empty text. A pattern
    /// longer than the text never matches.
    pub fn find<T: PartialEq>(&self, text: &[T], pattern: &[T]) -> Option<usize> {
        if pattern.len() > text.len() {
            return None;
        }
        (0..=text.len() - pattern.len()).find(|&start| {
            let window = &text[start..start + pattern.len()];
            bounded_mismatches(window, pattern, self.max_mismatches) <= self.max_mismatches
        })
    }

    /// Like [`find`](Self::find), comparing by `char`. The offset counts chars, not bytes.
    pub fn find_str(&self, text: &str, pattern: &str) -> Option<usize> {
        let text: Vec<char> = text.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        self.find(&text, &pattern)
    }
}

impl Default for AlmostEqualMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Count the positions where `window` and `pattern` differ, stopping once the count
/// exceeds `limit`. The result is therefore at most `limit + 1`.
///
/// Both slices are compared up to the shorter length.
pub fn bounded_mismatches<T: PartialEq>(window: &[T], pattern: &[T], limit: usize) -> usize {
    let mut mismatches = 0;
    for (a, b) in window.iter().zip(pattern) {
        if a != b {
            mismatches += 1;
            if mismatches > limit {
                break;
            }
        }
    }
    mismatches
}

/// Find the first window of `text` within one substitution of `pattern`.
pub fn find_almost_equal<T: PartialEq>(text: &[T], pattern: &[T]) -> Option<usize> {
    AlmostEqualMatcher::new().find(text, pattern)
}

/// String form of [`find_almost_equal`]; offsets are char offsets.
pub fn find_almost_equal_str(text: &str, pattern: &str) -> Option<usize> {
    AlmostEqualMatcher::new().find_str(text, pattern)
}

/// Integer form of [`find_almost_equal_str`], returning [`NOT_FOUND`] when no window
/// qualifies.
pub fn find_almost_equal_index(text: &str, pattern: &str) -> i64 {
    offset_to_index(find_almost_equal_str(text, pattern))
}

/// Convert a search result into the integer convention used on the command line.
pub fn offset_to_index(offset: Option<usize>) -> i64 {
    offset.map_or(NOT_FOUND, |offset| offset as i64)
}
