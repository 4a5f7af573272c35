//! Template snapshot handling.
//!
//! The generator has no formula evaluation capability, so the template's
//! formula cells are pre-baked: the cached result stored alongside each
//! formula stands in for it. Anything cloned or shifted afterwards carries
//! plain literals, preserving the template's last-rendered appearance.

use umya_spreadsheet::Spreadsheet;

/// Replace every formula cell with its last-evaluated literal.
///
/// Idempotent; a workbook without formulas passes through unchanged.
pub fn literalize_formulas(book: &mut Spreadsheet) {
    for sheet in book.get_sheet_collection_mut() {
        for cell in sheet.get_cell_collection_mut() {
            if cell.is_formula() {
                cell.get_cell_value_mut().remove_formula();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_cells_keep_their_cached_result() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        let cell = sheet.get_cell_mut("A8");
        cell.set_formula("SUM(1,2)");
        cell.set_formula_result_default("3");
        sheet.get_cell_mut("B8").set_value_number(7);

        literalize_formulas(&mut book);

        let sheet = book.get_sheet(&0).unwrap();
        let baked = sheet.get_cell("A8").unwrap();
        assert!(!baked.is_formula());
        assert_eq!(baked.get_value(), "3");
        // non-formula cells are untouched
        assert_eq!(sheet.get_cell("B8").unwrap().get_value(), "7");
    }
}
