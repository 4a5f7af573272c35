//! Structural cloning of the styled template row.

use umya_spreadsheet::helper::coordinate::string_from_column_index;
use umya_spreadsheet::{Style, Worksheet};

use super::cells::RangeBounds;

/// Insert a blank row at `target_row` and replicate the template row onto it:
/// per-cell styles across the schema width, the row height, and every merged
/// region whose row span is exactly the template row.
///
/// Rows at and below `target_row` shift down by one; regions spanning more
/// than the template row are left untouched.
pub(crate) fn clone_template_row(
    sheet: &mut Worksheet,
    template_row: u32,
    target_row: u32,
    width: u32,
) {
    sheet.insert_new_row(&target_row, &1);

    for col in 1..=width {
        let style = sheet
            .get_cell((col, template_row))
            .map(|cell| cell.get_style().clone());
        // Untouched template cells carry no style; skip them so defaults
        // are not materialized on the new row.
        if let Some(style) = style.filter(|s| *s != Style::default()) {
            sheet.get_cell_mut((col, target_row)).set_style(style);
        }
    }

    let height = sheet
        .get_row_dimension(&template_row)
        .map(|row| *row.get_height())
        .filter(|h| *h > 0.0);
    if let Some(height) = height {
        let dimension = sheet.get_row_dimension_mut(&target_row);
        dimension.set_height(height);
        dimension.set_custom_height(true);
    }

    let spans: Vec<(u32, u32)> = sheet
        .get_merge_cells()
        .iter()
        .filter_map(RangeBounds::of)
        .filter(|b| b.start_row == template_row && b.end_row == template_row)
        .map(|b| (b.start_col, b.end_col))
        .collect();
    for (start_col, end_col) in spans {
        sheet.add_merge_cells(format!(
            "{}{}:{}{}",
            string_from_column_index(&start_col),
            target_row,
            string_from_column_index(&end_col),
            target_row
        ));
    }
}
