use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::payload::{lenient_f64, lenient_i64, lenient_opt_f64};

/// Top-level invocation payload: one calculation plus its line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportPayload {
    /// Invoice-level header context.
    pub calculation: Calculation,
    /// Ordered line items; row order in the output follows this order.
    pub items: Vec<LineItem>,
    /// Partial override of the country code table (BEYANNAME export).
    /// Overrides win over the built-in table on key collision.
    #[serde(default, rename = "customMappings")]
    pub custom_mappings: HashMap<String, String>,
    /// Caller-supplied timestamp suffix for output artifact names.
    #[serde(default)]
    pub timestamp: String,
}

/// Invoice-level header context for a tax calculation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    #[serde(default)]
    pub invoice_no: String,
    /// ISO-8601 issue date; displayed as `DD/MM/YYYY`.
    #[serde(default)]
    pub invoice_date: String,
    /// Invoice total in the reporting currency.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_value: f64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_quantity: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub transport_cost: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub insurance_cost: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub storage_cost: f64,
    /// USD/TL exchange rate applied by the calculation.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub currency_rate: f64,
    /// Output artifacts are named after this reference.
    #[serde(default = "default_reference")]
    pub reference: String,
}

impl Default for Calculation {
    fn default() -> Self {
        Self {
            invoice_no: String::new(),
            invoice_date: String::new(),
            total_value: 0.0,
            total_quantity: 0,
            transport_cost: 0.0,
            insurance_cost: 0.0,
            storage_cost: 0.0,
            currency_rate: 0.0,
            reference: default_reference(),
        }
    }
}

fn default_reference() -> String {
    "export".to_string()
}

impl Calculation {
    /// Invoice date reformatted as `DD/MM/YYYY`.
    ///
    /// Unparsable dates pass through verbatim rather than failing the run.
    pub fn display_invoice_date(&self) -> String {
        format_display_date(&self.invoice_date)
    }
}

fn format_display_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// A single computed customs line item.
///
/// Tax amounts arrive pre-computed by the upstream calculation; this crate
/// lays them out, it does not re-derive them (the two VAT-without-KKDF
/// figures are the only exception, see the report populator).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    /// US tariff classification code.
    #[serde(default)]
    pub hts_code: String,
    /// ISO 3166-1 alpha-2 country of origin.
    #[serde(default)]
    pub country_of_origin: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fabric_content: String,
    /// Unit cost in the reporting currency.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub unit_count: i64,
    /// Invoice value of the line; derived as `cost × unit_count` when absent.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub total_value: Option<f64>,
    /// Turkish re-mapping of the tariff code.
    #[serde(default)]
    pub tr_hs_code: String,
    /// Free-text requirements; carries the boolean flags as substrings.
    #[serde(default)]
    pub requirements: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub transport_share: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub insurance_share: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub storage_share: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub customs_tax: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub additional_customs_tax: f64,
    /// Resource-utilization support fund levy.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub kkdf: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vat: f64,
    /// VAT base with the KKDF levy included.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vat_base: f64,
    /// Total tax in the reporting currency.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_tax_usd: f64,
    /// Total tax in Turkish lira.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_tax_tl: f64,
    /// Rate data attached to the Turkish HS code; absent means every
    /// derived percentage defaults to zero.
    #[serde(default)]
    pub hs_code_data: Option<HsCodeData>,
    /// Master data of the underlying product.
    #[serde(default)]
    pub product_data: Option<ProductData>,
}

impl LineItem {
    /// Invoice value of the line: the payload value when present, else
    /// `cost × unit_count`.
    pub fn effective_total_value(&self) -> f64 {
        self.total_value
            .unwrap_or_else(|| self.cost * self.unit_count as f64)
    }

    /// An export registry form must accompany the shipment.
    pub fn needs_registry_form(&self) -> bool {
        self.requirements.contains("EX REGISTRY FORM")
    }

    /// An azo dye test certificate is required.
    pub fn needs_dye_test(&self) -> bool {
        self.requirements.contains("AZO DYE TEST")
    }

    /// The item passes through special customs handling.
    pub fn needs_special_customs(&self) -> bool {
        self.requirements.contains("SPECIAL CUSTOM")
    }

    /// VAT rate from the HS code data, zero when absent.
    pub fn vat_percent(&self) -> f64 {
        self.hs_code_data.as_ref().map_or(0.0, |hs| hs.vat_percent)
    }
}

/// Tax rates and descriptors attached to a Turkish HS code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HsCodeData {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub customs_tax_percent: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub additional_customs_tax_percent: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub kkdf_percent: f64,
    /// VAT rate as a fraction (0.10 = 10 %).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vat_percent: f64,
    /// Declared unit of measure.
    #[serde(default)]
    pub unit: String,
    /// Turkish-language goods description.
    #[serde(default)]
    pub description_tr: String,
}

/// Product master data referenced by a line item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub item_description: String,
}
