//! Cross-item tax totals and the summary block above the data region.

use umya_spreadsheet::Worksheet;

use crate::core::LineItem;

use super::cells;
use super::{SUMMARY_LABEL_ROW, SUMMARY_VALUE_ROW};

/// Tax figures summed across every line item.
///
/// Stored at full f64 precision; display rounding is left to the cell
/// number formats inherited from the template.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaxTotals {
    pub customs_tax: f64,
    pub additional_customs_tax: f64,
    pub kkdf: f64,
    pub vat: f64,
    pub total_tax_usd: f64,
    pub total_tax_tl: f64,
}

impl TaxTotals {
    pub fn from_items(items: &[LineItem]) -> Self {
        let mut totals = Self::default();
        for item in items {
            totals.customs_tax += item.customs_tax;
            totals.additional_customs_tax += item.additional_customs_tax;
            totals.kkdf += item.kkdf;
            totals.vat += item.vat;
            totals.total_tax_usd += item.total_tax_usd;
            totals.total_tax_tl += item.total_tax_tl;
        }
        totals
    }

    /// VAT total with the KKDF levy folded in.
    pub fn vat_with_kkdf(&self) -> f64 {
        self.vat + self.kkdf
    }

    /// Reporting-currency tax total with the KKDF levy excluded.
    pub fn total_tax_without_kkdf(&self) -> f64 {
        self.total_tax_usd - self.kkdf
    }
}

const SUMMARY_LABELS: [&str; 8] = [
    "TOTAL CUSTOMS TAX",
    "TOTAL ADD. CUSTOMS TAX",
    "TOTAL KKDF",
    "TOTAL VAT (KKDF INCLUDED)",
    "TOTAL VAT (KKDF EXCLUDED)",
    "TOTAL TAX (KKDF INCLUDED)",
    "TOTAL TAX (KKDF EXCLUDED)",
    "TOTAL TAX TURKISH LIRA",
];

/// Write the eight-label summary block (labels row 6, values row 7).
pub(crate) fn write_summary(sheet: &mut Worksheet, items: &[LineItem]) {
    let totals = TaxTotals::from_items(items);

    for (offset, label) in SUMMARY_LABELS.iter().enumerate() {
        cells::write_text(sheet, offset as u32 + 1, SUMMARY_LABEL_ROW, label);
    }

    let values = [
        totals.customs_tax,
        totals.additional_customs_tax,
        totals.kkdf,
        totals.vat_with_kkdf(),
        totals.vat,
        totals.total_tax_usd,
        totals.total_tax_without_kkdf(),
        totals.total_tax_tl,
    ];
    for (offset, value) in values.iter().enumerate() {
        cells::write_number(sheet, offset as u32 + 1, SUMMARY_VALUE_ROW, *value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(customs: f64, kkdf: f64, vat: f64, usd: f64, tl: f64) -> LineItem {
        LineItem {
            customs_tax: customs,
            kkdf,
            vat,
            total_tax_usd: usd,
            total_tax_tl: tl,
            ..Default::default()
        }
    }

    #[test]
    fn totals_sum_all_items() {
        let items = vec![
            item(10.0, 2.0, 5.0, 17.0, 500.0),
            item(1.5, 0.5, 2.5, 4.5, 120.0),
        ];
        let totals = TaxTotals::from_items(&items);
        assert_eq!(totals.customs_tax, 11.5);
        assert_eq!(totals.kkdf, 2.5);
        assert_eq!(totals.vat, 7.5);
        assert_eq!(totals.total_tax_tl, 620.0);
    }

    #[test]
    fn derived_totals() {
        let totals = TaxTotals {
            kkdf: 2.5,
            vat: 7.5,
            total_tax_usd: 21.5,
            ..Default::default()
        };
        assert_eq!(totals.vat_with_kkdf(), 10.0);
        assert_eq!(totals.total_tax_without_kkdf(), 19.0);
    }

    #[test]
    fn empty_items_sum_to_zero() {
        assert_eq!(TaxTotals::from_items(&[]), TaxTotals::default());
    }
}
