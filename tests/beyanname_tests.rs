#![cfg(feature = "beyanname")]

use std::collections::HashMap;

use gumruk::beyanname::{BeyannameConfig, export_beyanname, render_beyanname};
use gumruk::core::*;
use umya_spreadsheet::{NumberingFormat, Spreadsheet, Style, Worksheet};

/// The declaration template is a plain header row; data rows start at 2.
fn synthetic_template() -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).unwrap();
    let headers = [
        "GTİP", "KIYMET", "MENŞE", "MİKTAR CİNS", "KAP ADET", "KAP CİNS", "MARKA", "ADET", "K1",
        "SİP TÜRÜ", "ATR DİĞER", "İŞL. NİT", "TANIM", "KDV", "NO",
    ];
    for (offset, header) in headers.iter().enumerate() {
        sheet
            .get_cell_mut((offset as u32 + 1, 1u32))
            .set_value_string(*header);
    }
    book
}

fn item() -> LineItem {
    LineItem {
        tr_hs_code: "6109100000".into(),
        country_of_origin: "VN".into(),
        style: "A100".into(),
        fabric_content: "100% COTTON".into(),
        cost: 3.95,
        unit_count: 160,
        // an explicit CIF-style total must not leak into the declaration
        total_value: Some(700.0),
        hs_code_data: Some(HsCodeData {
            vat_percent: 0.10,
            unit: "ADET".into(),
            description_tr: "TİŞÖRT".into(),
            ..Default::default()
        }),
        product_data: Some(ProductData {
            brand: "ACME".into(),
            item_description: "BASIC TEE".into(),
        }),
        ..Default::default()
    }
}

fn payload(items: Vec<LineItem>) -> ExportPayload {
    ExportPayload {
        calculation: Calculation {
            reference: "calc-7f3a".into(),
            ..Default::default()
        },
        items,
        timestamp: "20240815T120000".into(),
        ..Default::default()
    }
}

fn text(sheet: &Worksheet, col: u32, row: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(|c| c.get_value().to_string())
        .unwrap_or_default()
}

#[test]
fn declaration_row_layout() {
    let mut book = synthetic_template();
    render_beyanname(&mut book, &payload(vec![item()])).unwrap();

    let sheet = book.get_sheet(&0).unwrap();
    assert_eq!(text(sheet, 1, 2), "6109100000");
    // KIYMET is cost × units, not the payload total
    assert_eq!(text(sheet, 2, 2).parse::<f64>().unwrap(), 3.95 * 160.0);
    assert_eq!(text(sheet, 3, 2), "690");
    assert_eq!(text(sheet, 4, 2), "ADET");
    assert_eq!(text(sheet, 5, 2), "1");
    assert_eq!(text(sheet, 6, 2), "BI");
    assert_eq!(text(sheet, 7, 2), "ACME");
    assert_eq!(text(sheet, 8, 2).parse::<f64>().unwrap(), 160.0);
    assert_eq!(text(sheet, 9, 2), "K1");
    assert_eq!(text(sheet, 10, 2), "9");
    assert_eq!(text(sheet, 11, 2), "");
    assert_eq!(text(sheet, 12, 2), "11");
    assert_eq!(text(sheet, 13, 2), "A100 TİŞÖRT BASIC TEE 100% COTTON");
    assert!((text(sheet, 14, 2).parse::<f64>().unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(text(sheet, 15, 2), "-");
    // header row untouched
    assert_eq!(text(sheet, 1, 1), "GTİP");
}

#[test]
fn origin_cell_is_text_typed() {
    let mut book = synthetic_template();
    let mut leading_zero = item();
    leading_zero.country_of_origin = "IT".into();
    render_beyanname(&mut book, &payload(vec![leading_zero])).unwrap();

    let sheet = book.get_sheet(&0).unwrap();
    // Italy's numeric code keeps its leading zeros
    assert_eq!(text(sheet, 3, 2), "005");

    let mut expected = Style::default();
    expected
        .get_number_format_mut()
        .set_format_code(NumberingFormat::FORMAT_TEXT);
    assert_eq!(
        sheet.get_cell((3, 2)).unwrap().get_style().get_number_format(),
        expected.get_number_format()
    );
}

#[test]
fn custom_mapping_overrides_default_table() {
    let mut book = synthetic_template();
    let mut p = payload(vec![item()]);
    p.custom_mappings = HashMap::from([("VN".to_string(), "999".to_string())]);
    render_beyanname(&mut book, &p).unwrap();

    let sheet = book.get_sheet(&0).unwrap();
    assert_eq!(text(sheet, 3, 2), "999");
}

#[test]
fn unmapped_origin_resolves_blank() {
    let mut book = synthetic_template();
    let mut unmapped = item();
    unmapped.country_of_origin = "ZZ".into();
    render_beyanname(&mut book, &payload(vec![unmapped])).unwrap();

    let sheet = book.get_sheet(&0).unwrap();
    assert_eq!(text(sheet, 3, 2), "");
}

#[test]
fn one_row_per_item_from_row_two() {
    let mut book = synthetic_template();
    let mut second = item();
    second.tr_hs_code = "6110202079".into();
    render_beyanname(&mut book, &payload(vec![item(), second])).unwrap();

    let sheet = book.get_sheet(&0).unwrap();
    assert_eq!(text(sheet, 1, 2), "6109100000");
    assert_eq!(text(sheet, 1, 3), "6110202079");
    assert_eq!(text(sheet, 1, 4), "");
}

#[test]
fn export_writes_artifact_with_reference_and_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("beyanname_template.xlsx");
    gumruk::workbook::save(&synthetic_template(), &template_path).unwrap();

    let config = BeyannameConfig {
        template_path,
        output_dir: dir.path().to_path_buf(),
    };
    let path = export_beyanname(&payload(vec![item()]), &config).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "beyanname_calc-7f3a_20240815T120000.xlsx"
    );
    assert!(path.exists());
}

#[test]
fn missing_template_is_a_template_load_error() {
    let config = BeyannameConfig {
        template_path: "/nonexistent/beyanname.xlsx".into(),
        output_dir: std::env::temp_dir(),
    };
    let err = export_beyanname(&payload(Vec::new()), &config).unwrap_err();
    assert!(matches!(err, ExportError::TemplateLoad(_)), "{err}");
}
