//! Template-driven tax calculation worksheet.
//!
//! The template carries one styled data row plus merged header regions; the
//! generator replicates that row once per line item, fills the fixed
//! 30-column schema, writes the invoice header and tax summary blocks above
//! the data, and scrubs the template's leftover footprint below it.
//!
//! # Example
//!
//! ```ignore
//! use gumruk::core::parse_payload;
//! use gumruk::report::{ReportConfig, export_tax_report};
//!
//! let payload = parse_payload(&input)?;
//! let path = export_tax_report(&payload, &ReportConfig::default())?;
//! ```

mod cells;
mod rows;
mod scrub;
mod summary;
pub mod template;

pub use summary::TaxTotals;

use std::path::PathBuf;

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::core::{Calculation, ExportError, ExportPayload, LineItem};
use crate::workbook;

/// Row holding the styled template data row; the first line item lands here
/// in place, further items are cloned below it.
pub const TEMPLATE_DATA_ROW: u32 = 10;
/// Width of the fixed column schema (A..AD).
pub const SCHEMA_WIDTH: u32 = 30;

const SUMMARY_LABEL_ROW: u32 = 6;
const SUMMARY_VALUE_ROW: u32 = 7;
const COLUMN_HEADER_ROW: u32 = 9;

/// Banding fill for even item indices.
const BAND_SHADED_ARGB: &str = "FFD3D3D3";
/// Banding fill for odd item indices.
const BAND_UNSHADED_ARGB: &str = "FFFFFFFF";

/// Configuration for the tax worksheet export.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Path of the styled template workbook.
    pub template_path: PathBuf,
    /// Directory receiving the generated artifact.
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("templates/tax_worksheet.xlsx"),
            output_dir: std::env::temp_dir(),
        }
    }
}

/// Generate the tax calculation worksheet for `payload` and write it to
/// `<output_dir>/tax_calculation_<reference>.xlsx`.
///
/// Returns the path of the written artifact. Any failure aborts the whole
/// generation; no partial output is produced.
pub fn export_tax_report(
    payload: &ExportPayload,
    config: &ReportConfig,
) -> Result<PathBuf, ExportError> {
    let mut book = workbook::read_template(&config.template_path)?;
    render_report(&mut book, payload)?;

    let output_path = config.output_dir.join(format!(
        "tax_calculation_{}.xlsx",
        payload.calculation.reference
    ));
    workbook::save(&book, &output_path)?;
    log::debug!(
        "tax report for {} written to {}",
        payload.calculation.reference,
        output_path.display()
    );
    Ok(output_path)
}

/// Render the report into an already-loaded template workbook.
pub fn render_report(book: &mut Spreadsheet, payload: &ExportPayload) -> Result<(), ExportError> {
    template::literalize_formulas(book);

    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| ExportError::Worksheet("template workbook has no sheets".into()))?;

    write_header_context(sheet, &payload.calculation);
    summary::write_summary(sheet, &payload.items);
    write_column_headers(sheet);

    for (index, item) in payload.items.iter().enumerate() {
        let row = TEMPLATE_DATA_ROW + index as u32;
        if index > 0 {
            rows::clone_template_row(sheet, TEMPLATE_DATA_ROW, row, SCHEMA_WIDTH);
        }
        write_item_row(sheet, row, item);
        apply_banding(sheet, row, index);
    }

    scrub::scrub_leftover_regions(sheet, last_data_row(payload.items.len()));
    Ok(())
}

/// Row of the final populated item. With no items this is the row above the
/// template row, putting the whole template row inside the scrub region.
fn last_data_row(item_count: usize) -> u32 {
    TEMPLATE_DATA_ROW + item_count as u32 - 1
}

/// Invoice-level context block in rows 2 and 4.
fn write_header_context(sheet: &mut Worksheet, calc: &Calculation) {
    cells::write_text(sheet, 2, 2, &calc.invoice_no);
    cells::write_text(sheet, 2, 4, &calc.display_invoice_date());

    cells::write_text(sheet, 3, 2, "TOTAL VALUE");
    cells::write_number(sheet, 4, 2, calc.total_value);
    cells::write_number(sheet, 4, 4, calc.total_quantity as f64);
    cells::write_text(sheet, 5, 2, "TRANSPORT COST");
    cells::write_text(sheet, 5, 4, "INSURANCE COST");
    cells::write_text(sheet, 7, 2, "STORAGE COST");
    cells::write_text(sheet, 7, 4, "CURRENCY -USD/TL-");
    cells::write_number(sheet, 6, 2, calc.transport_cost);
    cells::write_number(sheet, 6, 4, calc.insurance_cost);
    cells::write_number(sheet, 8, 2, calc.storage_cost);
    cells::write_number(sheet, 8, 4, calc.currency_rate);
}

/// Column captions for the data region. The order mirrors the schema and is
/// a compatibility contract with downstream consumers of the artifact.
const COLUMN_HEADERS: [&str; 30] = [
    "HTS Codes",
    "Country of Origin",
    "Style",
    "Color",
    "Category",
    "Description",
    "Fabric Content",
    "Cost",
    "Unit",
    "Total Value",
    "TR HS CODE",
    "EX REGISTRY FORM",
    "AZO DYE TEST",
    "SPECIAL CUSTOMS",
    "TRANSPORT",
    "INSURANCE",
    "STORAGE",
    "CUSTOMS TAX %",
    "ADDITIONAL CUSTOMS TAX %",
    "KKDF %",
    "VAT %",
    "TOTAL CUSTOMS TAX",
    "TOTAL ADDT CUSTOMS TAX",
    "KKDF VALUE",
    "VAT BASE WITH KKDF",
    "VAT BASE WITHOUT KKDF",
    "VAT VALUE WITH KKDF",
    "VAT VALUE WITHOUT KKDF",
    "TOTAL TAX WITH KKDF",
    "TOTAL TAX WITHOUT KKDF",
];

fn write_column_headers(sheet: &mut Worksheet) {
    for (offset, header) in COLUMN_HEADERS.iter().enumerate() {
        cells::write_text(sheet, offset as u32 + 1, COLUMN_HEADER_ROW, header);
    }
}

fn flag_marker(set: bool) -> &'static str {
    if set { "X" } else { "" }
}

/// Fill the 30-column schema for one item.
fn write_item_row(sheet: &mut Worksheet, row: u32, item: &LineItem) {
    let hs = item.hs_code_data.as_ref();

    cells::write_text(sheet, 1, row, &item.hts_code);
    cells::write_text(sheet, 2, row, &item.country_of_origin);
    cells::write_text(sheet, 3, row, &item.style);
    cells::write_text(sheet, 4, row, &item.color);
    cells::write_text(sheet, 5, row, &item.category);
    cells::write_text(sheet, 6, row, &item.description);
    cells::write_text(sheet, 7, row, &item.fabric_content);
    cells::write_number(sheet, 8, row, item.cost);
    cells::write_number(sheet, 9, row, item.unit_count as f64);
    cells::write_number(sheet, 10, row, item.effective_total_value());
    cells::write_text(sheet, 11, row, &item.tr_hs_code);
    cells::write_text(sheet, 12, row, flag_marker(item.needs_registry_form()));
    cells::write_text(sheet, 13, row, flag_marker(item.needs_dye_test()));
    cells::write_text(sheet, 14, row, flag_marker(item.needs_special_customs()));
    cells::write_number(sheet, 15, row, item.transport_share);
    cells::write_number(sheet, 16, row, item.insurance_share);
    cells::write_number(sheet, 17, row, item.storage_share);
    cells::write_number(sheet, 18, row, hs.map_or(0.0, |h| h.customs_tax_percent));
    cells::write_number(
        sheet,
        19,
        row,
        hs.map_or(0.0, |h| h.additional_customs_tax_percent),
    );
    cells::write_number(sheet, 20, row, hs.map_or(0.0, |h| h.kkdf_percent));
    cells::write_number(sheet, 21, row, hs.map_or(0.0, |h| h.vat_percent));

    // The upstream calculation only supplies the KKDF-inclusive figures;
    // the KKDF-exclusive pair is derived here.
    let vat_base_without_kkdf = item.vat_base - item.kkdf;
    let vat_without_kkdf = vat_base_without_kkdf * item.vat_percent();

    cells::write_number(sheet, 22, row, item.customs_tax);
    cells::write_number(sheet, 23, row, item.additional_customs_tax);
    cells::write_number(sheet, 24, row, item.kkdf);
    cells::write_number(sheet, 25, row, item.vat_base);
    cells::write_number(sheet, 26, row, vat_base_without_kkdf);
    cells::write_number(sheet, 27, row, item.vat);
    cells::write_number(sheet, 28, row, vat_without_kkdf);
    cells::write_number(sheet, 29, row, item.total_tax_usd);
    cells::write_number(sheet, 30, row, item.total_tax_usd - item.kkdf);
}

/// Alternating row fill keyed on item parity, for visual scanability.
fn apply_banding(sheet: &mut Worksheet, row: u32, index: usize) {
    let argb = if index % 2 == 0 {
        BAND_SHADED_ARGB
    } else {
        BAND_UNSHADED_ARGB
    };
    for col in 1..=SCHEMA_WIDTH {
        sheet.get_style_mut((col, row)).set_background_color(argb);
    }
}
