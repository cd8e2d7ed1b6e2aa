//! Misc utility functions

/// The binary search hints written in the table directory.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory>
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchRange {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchRange {
    /// Compute the hints for `n_items` records of `item_size` bytes each.
    pub fn compute(n_items: usize, item_size: usize) -> Self {
        if n_items == 0 {
            return Self::default();
        }
        let entry_selector = n_items.ilog2();
        let search_range = (1usize << entry_selector) * item_size;
        let range_shift = n_items * item_size - search_range;
        SearchRange {
            search_range: search_range.try_into().unwrap_or(u16::MAX),
            entry_selector: entry_selector as u16,
            range_shift: range_shift.try_into().unwrap_or(u16::MAX),
        }
    }
}

/// Round up to the next multiple of four.
pub(crate) fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_range() {
        // Roboto has 22 tables
        let computed = SearchRange::compute(22, 16);
        assert_eq!(
            (
                computed.search_range,
                computed.entry_selector,
                computed.range_shift
            ),
            (256, 4, 96)
        );
        let one = SearchRange::compute(1, 16);
        assert_eq!((one.search_range, one.entry_selector, one.range_shift), (16, 0, 0));
        assert_eq!(SearchRange::compute(0, 16), SearchRange::default());
    }

    #[test]
    fn pad4() {
        for i in 0..10 {
            let padded = round4(i);
            assert!(padded - i < 4);
            assert_eq!(padded % 4, 0, "pad {i}");
        }
    }
}
