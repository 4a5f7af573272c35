//! Merge-aware cell writes.
//!
//! Only the anchor (top-left) cell of a merged region is independently
//! addressable; a write landing anywhere else inside a region is redirected
//! to the anchor, matching spreadsheet semantics. Regions are added while
//! rows are cloned, so the resolution runs against the live region set on
//! every write.

use umya_spreadsheet::{Range, Worksheet};

/// Write a text value at `(col, row)`, redirecting into merged regions.
pub(crate) fn write_text(sheet: &mut Worksheet, col: u32, row: u32, value: &str) {
    let Some((col, row)) = resolve_target(sheet, col, row) else {
        return;
    };
    sheet.get_cell_mut((col, row)).set_value_string(value);
}

/// Write a numeric value at `(col, row)`, redirecting into merged regions.
pub(crate) fn write_number(sheet: &mut Worksheet, col: u32, row: u32, value: f64) {
    let Some((col, row)) = resolve_target(sheet, col, row) else {
        return;
    };
    sheet.get_cell_mut((col, row)).set_value_number(value);
}

/// Resolve a target coordinate to the cell that actually receives the write.
///
/// Unaddressable coordinates resolve to `None` and the write is dropped
/// silently.
fn resolve_target(sheet: &Worksheet, col: u32, row: u32) -> Option<(u32, u32)> {
    if col == 0 || row == 0 {
        return None;
    }
    for range in sheet.get_merge_cells() {
        let Some(bounds) = RangeBounds::of(range) else {
            continue;
        };
        if bounds.contains(col, row) {
            return Some((bounds.start_col, bounds.start_row));
        }
    }
    Some((col, row))
}

/// Numeric bounds of a merged region, 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RangeBounds {
    pub start_col: u32,
    pub start_row: u32,
    pub end_col: u32,
    pub end_row: u32,
}

impl RangeBounds {
    /// Extract bounds from a worksheet range. Open-ended ranges collapse to
    /// their start coordinate.
    pub(crate) fn of(range: &Range) -> Option<Self> {
        let start_col = *range.get_coordinate_start_col().as_ref()?.get_num();
        let start_row = *range.get_coordinate_start_row().as_ref()?.get_num();
        let end_col = range
            .get_coordinate_end_col()
            .as_ref()
            .map_or(start_col, |c| *c.get_num());
        let end_row = range
            .get_coordinate_end_row()
            .as_ref()
            .map_or(start_row, |r| *r.get_num());
        Some(Self {
            start_col,
            start_row,
            end_col,
            end_row,
        })
    }

    pub(crate) fn contains(&self, col: u32, row: u32) -> bool {
        col >= self.start_col && col <= self.end_col && row >= self.start_row && row <= self.end_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_write_outside_merges() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        write_text(sheet, 1, 1, "plain");
        assert_eq!(sheet.get_cell((1, 1)).unwrap().get_value(), "plain");
    }

    #[test]
    fn merged_write_lands_on_anchor() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.add_merge_cells("B2:D3");

        write_text(sheet, 3, 3, "into the region");
        assert_eq!(
            sheet.get_cell((2, 2)).unwrap().get_value(),
            "into the region"
        );
        assert!(sheet.get_cell((3, 3)).is_none());
    }

    #[test]
    fn zero_coordinate_is_dropped() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        write_number(sheet, 0, 5, 1.0);
        assert!(sheet.get_cell_collection().is_empty());
    }
}
