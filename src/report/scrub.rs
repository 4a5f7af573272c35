//! Post-generation cleanup of leftover template artifacts.
//!
//! The template asset carries values and styling far beyond the region a
//! report actually populates. Three fixed rectangles are blanked (value,
//! borders, fill) and each is covered with a single always-true conditional
//! rule drawing white borders, so the sheet reads as empty past the data.
//! The extents below are policy tied to this one template asset.

use umya_spreadsheet::helper::coordinate::string_from_column_index;
use umya_spreadsheet::{
    Border, Color, ConditionalFormatValues, ConditionalFormatting,
    ConditionalFormattingRule, Fill, Style, Worksheet,
};

use super::SCHEMA_WIDTH;

/// Lowest row the template asset is known to style.
const SCRUB_MAX_ROW: u32 = 6000;
/// First of the unused far-right columns (AE).
const EXTRA_COL_START: u32 = 31;
/// Last of the unused far-right columns (BZ).
const EXTRA_COL_END: u32 = 78;
/// The header-band spill starts at column AC.
const HEADER_BAND_COL_START: u32 = 29;
/// The header band occupies rows 1..=7.
const HEADER_BAND_MAX_ROW: u32 = 7;

#[derive(Debug, Clone, Copy)]
struct ScrubRegion {
    min_col: u32,
    min_row: u32,
    max_col: u32,
    max_row: u32,
}

impl ScrubRegion {
    fn sqref(&self) -> String {
        format!(
            "{}{}:{}{}",
            string_from_column_index(&self.min_col),
            self.min_row,
            string_from_column_index(&self.max_col),
            self.max_row
        )
    }
}

/// Blank the three leftover regions and attach their white-border rules.
///
/// `last_data_row` is the row of the final populated item; with no items it
/// is the row above the template row, so the template row itself is erased.
pub(crate) fn scrub_leftover_regions(sheet: &mut Worksheet, last_data_row: u32) {
    let regions = [
        // Main area below the last data row.
        ScrubRegion {
            min_col: 1,
            min_row: last_data_row + 1,
            max_col: SCHEMA_WIDTH,
            max_row: SCRUB_MAX_ROW,
        },
        // Header band spilling into the far-right columns.
        ScrubRegion {
            min_col: HEADER_BAND_COL_START,
            min_row: 1,
            max_col: EXTRA_COL_END,
            max_row: HEADER_BAND_MAX_ROW,
        },
        // Far-right columns over the template's full height.
        ScrubRegion {
            min_col: EXTRA_COL_START,
            min_row: 1,
            max_col: EXTRA_COL_END,
            max_row: SCRUB_MAX_ROW,
        },
    ];

    for (index, region) in regions.iter().enumerate() {
        blank_region(sheet, region);
        add_white_border_rule(sheet, region, index as i32 + 1);
    }
}

/// Clear value, borders, and fill of every existing cell in the region.
/// Absent cells are already blank and are not materialized.
fn blank_region(sheet: &mut Worksheet, region: &ScrubRegion) {
    let max_row = region.max_row.min(sheet.get_highest_row());
    for row in region.min_row..=max_row {
        for col in region.min_col..=region.max_col {
            if sheet.get_cell((col, row)).is_none() {
                continue;
            }
            let cell = sheet.get_cell_mut((col, row));
            let style = cell.get_style_mut();
            *style.get_borders_mut() = Default::default();
            style.set_fill(Fill::default());
            if !cell.get_value().is_empty() {
                cell.set_value(String::new());
            }
        }
    }
}

/// One expression rule (`TRUE`) whose differential style draws thin white
/// borders across the whole region.
fn add_white_border_rule(sheet: &mut Worksheet, region: &ScrubRegion, priority: i32) {
    let mut white = Border::default();
    white.set_border_style(Border::BORDER_THIN);
    white.get_color_mut().set_argb(Color::COLOR_WHITE);

    let mut dxf = Style::default();
    let borders = dxf.get_borders_mut();
    borders.set_left_border(white.clone());
    borders.set_right_border(white.clone());
    borders.set_top_border(white.clone());
    borders.set_bottom_border(white);

    let mut rule = ConditionalFormattingRule::default();
    rule.set_type(ConditionalFormatValues::Expression);
    rule.set_priority(priority);
    rule.set_stop_if_true(false);
    let mut formula = umya_spreadsheet::Formula::default();
    formula.set_string_value("TRUE");
    rule.set_formula(formula);
    rule.set_style(dxf);

    let mut formatting = ConditionalFormatting::default();
    formatting
        .get_sequence_of_references_mut()
        .set_sqref(region.sqref());
    formatting.set_conditional_collection(vec![rule]);

    let mut collection = sheet.get_conditional_formatting_collection().to_vec();
    collection.push(formatting);
    sheet.set_conditional_formatting_collection(collection);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqref_rendering() {
        let region = ScrubRegion {
            min_col: 1,
            min_row: 12,
            max_col: 30,
            max_row: 6000,
        };
        assert_eq!(region.sqref(), "A12:AD6000");
    }

    #[test]
    fn leftovers_are_blanked_and_rules_attached() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.get_cell_mut("A15").set_value_string("LEFTOVER");
        sheet.get_cell_mut("AG3").set_value_string("LEFTOVER");
        sheet.get_style_mut("B20").set_background_color("FF00FF00");

        scrub_leftover_regions(sheet, 11);

        assert_eq!(sheet.get_cell("A15").unwrap().get_value(), "");
        assert_eq!(sheet.get_cell("AG3").unwrap().get_value(), "");

        let sqrefs: Vec<String> = sheet
            .get_conditional_formatting_collection()
            .iter()
            .map(|cf| cf.get_sequence_of_references().get_sqref().to_string())
            .collect();
        assert_eq!(sqrefs, vec!["A12:AD6000", "AC1:BZ7", "AE1:BZ6000"]);
    }

    #[test]
    fn data_rows_are_left_alone() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.get_cell_mut("A10").set_value_string("kept");
        sheet.get_cell_mut("A12").set_value_string("gone");

        scrub_leftover_regions(sheet, 11);

        assert_eq!(sheet.get_cell("A10").unwrap().get_value(), "kept");
        assert_eq!(sheet.get_cell("A12").unwrap().get_value(), "");
    }
}
