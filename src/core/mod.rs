//! Payload types, country code conversion, and the error taxonomy.
//!
//! Everything here is independent of any spreadsheet library; the exporter
//! modules consume these types.

mod countries;
mod error;
mod payload;
mod types;

pub use countries::*;
pub use error::*;
pub use payload::{parse_payload, payload_from_value};
pub use types::*;
