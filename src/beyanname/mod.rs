//! BEYANNAME declaration transfer export.
//!
//! Maps each line item onto a fixed-size declaration template: one row per
//! item starting under the header row, fifteen columns, no row insertion and
//! no merge handling. The column meanings follow the customs broker's
//! transfer sheet (GTİP, KIYMET, MENŞE, …).

use std::path::PathBuf;

use umya_spreadsheet::{NumberingFormat, Worksheet};

use crate::core::{CountryCodeMap, ExportError, ExportPayload, LineItem};
use crate::workbook;

/// First data row; row 1 carries the column headers.
const DATA_START_ROW: u32 = 2;

/// Configuration for the BEYANNAME transfer export.
#[derive(Debug, Clone)]
pub struct BeyannameConfig {
    /// Path of the pre-sized declaration template.
    pub template_path: PathBuf,
    /// Directory receiving the generated artifact.
    pub output_dir: PathBuf,
}

impl Default for BeyannameConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("templates/beyanname_transfer.xlsx"),
            output_dir: std::env::temp_dir(),
        }
    }
}

/// Generate the declaration transfer workbook for `payload` and write it to
/// `<output_dir>/beyanname_<reference>_<timestamp>.xlsx`.
///
/// Country codes are resolved through the built-in table merged with the
/// payload's `customMappings` overrides.
pub fn export_beyanname(
    payload: &ExportPayload,
    config: &BeyannameConfig,
) -> Result<PathBuf, ExportError> {
    let mut book = workbook::read_template(&config.template_path)?;
    render_beyanname(&mut book, payload)?;

    let output_path = config.output_dir.join(format!(
        "beyanname_{}_{}.xlsx",
        payload.calculation.reference, payload.timestamp
    ));
    workbook::save(&book, &output_path)?;
    Ok(output_path)
}

/// Render the declaration rows into an already-loaded template workbook.
pub fn render_beyanname(
    book: &mut umya_spreadsheet::Spreadsheet,
    payload: &ExportPayload,
) -> Result<(), ExportError> {
    let countries = CountryCodeMap::with_overrides(payload.custom_mappings.clone());
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| ExportError::Worksheet("declaration template has no sheets".into()))?;

    for (index, item) in payload.items.iter().enumerate() {
        write_declaration_row(sheet, DATA_START_ROW + index as u32, item, &countries);
    }
    Ok(())
}

fn write_declaration_row(
    sheet: &mut Worksheet,
    row: u32,
    item: &LineItem,
    countries: &CountryCodeMap,
) {
    let hs = item.hs_code_data.as_ref();
    let product = item.product_data.as_ref();

    // KIYMET is the plain invoice value of the line, never the CIF value.
    let invoice_value = item.cost * item.unit_count as f64;
    let vat_percent = item.vat_percent() * 100.0;

    // Origin comes from the calculation's own line item, not from product
    // master data, so the country picked for this calculation wins.
    let origin = countries.resolve(&item.country_of_origin);
    log::debug!(
        "declaration row {row}: origin {:?} -> {origin:?}",
        item.country_of_origin
    );

    sheet
        .get_cell_mut((1, row))
        .set_value_string(item.tr_hs_code.as_str()); // GTİP
    sheet.get_cell_mut((2, row)).set_value_number(invoice_value); // KIYMET

    // MENŞE is text-typed so leading zeros in the numeric code survive.
    let origin_cell = sheet.get_cell_mut((3, row));
    origin_cell.set_value_string(origin);
    origin_cell
        .get_style_mut()
        .get_number_format_mut()
        .set_format_code(NumberingFormat::FORMAT_TEXT);

    sheet
        .get_cell_mut((4, row))
        .set_value_string(hs.map_or("", |h| h.unit.as_str())); // MİKTAR CİNS
    sheet.get_cell_mut((5, row)).set_value_string("1"); // KAP ADET
    sheet.get_cell_mut((6, row)).set_value_string("BI"); // KAP CİNS
    sheet
        .get_cell_mut((7, row))
        .set_value_string(product.map_or("", |p| p.brand.as_str())); // MARKA
    sheet
        .get_cell_mut((8, row))
        .set_value_number(item.unit_count as f64); // ADET
    sheet.get_cell_mut((9, row)).set_value_string("K1");
    sheet.get_cell_mut((10, row)).set_value_string("9"); // SİP TÜRÜ
    sheet.get_cell_mut((11, row)).set_value_string(""); // ATR DİĞER
    sheet.get_cell_mut((12, row)).set_value_string("11"); // İŞL. NİT
    sheet
        .get_cell_mut((13, row))
        .set_value_string(declaration_description(item)); // TANIM
    sheet.get_cell_mut((14, row)).set_value_number(vat_percent); // KDV
    sheet.get_cell_mut((15, row)).set_value_string("-"); // NO
}

/// TANIM: style, Turkish HS description, product description, and fabric
/// content joined with single spaces, blanks skipped.
fn declaration_description(item: &LineItem) -> String {
    let hs_description = item
        .hs_code_data
        .as_ref()
        .map_or("", |h| h.description_tr.as_str());
    let item_description = item
        .product_data
        .as_ref()
        .map_or("", |p| p.item_description.as_str());

    [
        item.style.as_str(),
        hs_description,
        item_description,
        item.fabric_content.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
}
