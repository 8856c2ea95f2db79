//! Record model and sensitive-field metadata for Casevault.
//!
//! Which fields of which record types carry PII is declared statically at
//! registry construction, not discovered through runtime reflection. The
//! encryption hooks consume the registry through the [`SensitiveFieldSource`]
//! trait, so hosts can substitute their own metadata backend.

mod record;
mod registry;

pub use record::{has_date_semantics, parse_canonical_date, FieldValue, Record};
pub use registry::{SensitiveFieldSource, StaticFieldRegistry};
