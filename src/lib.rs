//! # gumruk
//!
//! Turkish customs tax reporting toolkit: styled Excel worksheets for tax
//! calculations, BEYANNAME declaration transfer files, and object-storage
//! backups.
//!
//! The input is a single JSON payload carrying one `calculation` and its
//! `items`; the exporters lay the pre-computed figures out on top of styled
//! xlsx templates. Monetary values stay `f64` end to end; the upstream
//! calculation owns rounding, this crate only places values.
//!
//! ## Quick Start
//!
//! ```rust
//! use gumruk::core::*;
//!
//! let payload = parse_payload(r#"{
//!     "calculation": { "invoice_no": "INV-7", "reference": "calc-42" },
//!     "items": [
//!         { "hts_code": "6109.10", "cost": "10.5", "unit_count": 4,
//!           "requirements": "EX REGISTRY FORM" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(payload.calculation.reference, "calc-42");
//! assert_eq!(payload.items[0].cost, 10.5);
//! assert_eq!(payload.items[0].effective_total_value(), 42.0);
//! assert!(payload.items[0].needs_registry_form());
//! ```
//!
//! With the `report` feature, the payload becomes a worksheet:
//!
//! ```rust,ignore
//! use gumruk::report::{ReportConfig, export_tax_report};
//!
//! let config = ReportConfig::default();
//! let path = export_tax_report(&payload, &config)?;
//! println!("{}", path.display());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Payload types, parsing, country code table |
//! | `report` | Template-driven tax calculation worksheet |
//! | `beyanname` | Static-template BEYANNAME transfer export |
//! | `backup` | Object-storage backup to a zip archive |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(any(feature = "report", feature = "beyanname"))]
pub mod workbook;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "beyanname")]
pub mod beyanname;

#[cfg(feature = "backup")]
pub mod backup;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
