// formsieve-core/src/phone.rs
//! Thin adapter over the `phonenumber` crate for region-aware validation.
//!
//! Parse failures never escape this module: an unknown region code or an
//! unparseable number simply makes the number invalid.

use log::debug;
use phonenumber::country;

/// Returns `true` when `raw` is a valid phone number for the ISO 3166-1
/// alpha-2 `region` (e.g. `"US"`, `"ch"`).
pub fn is_valid_for_region(raw: &str, region: &str) -> bool {
    let region_code = region.trim().to_ascii_uppercase();
    let Ok(region_id) = region_code.parse::<country::Id>() else {
        debug!("Unknown phone region code '{}'.", region_code);
        return false;
    };

    match phonenumber::parse(Some(region_id), raw) {
        Ok(number) => phonenumber::is_valid(&number),
        Err(e) => {
            debug!("Phone number rejected for region {}: {}", region_code, e);
            false
        }
    }
}
