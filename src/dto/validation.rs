//! Validation helpers for DTOs.

use std::str::FromStr;

use palette::Srgb;
use validator::ValidationError;

/// Validates that a color is a hex RGB value such as `#1e3a8a` or `#fff`.
///
/// An empty string is accepted and means "keep the current color".
///
/// # Examples
///
/// ```ignore
/// validate_hex_color("#1e3a8a") // Ok
/// validate_hex_color("")        // Ok - unchanged
/// validate_hex_color("navy")    // Err - not hex
/// ```
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if color.is_empty() {
        return Ok(());
    }

    if !color.starts_with('#') || Srgb::<u8>::from_str(color).is_err() {
        let mut err = ValidationError::new("hex_color");
        err.message = Some(format!("`{color}` is not a #rrggbb color").into());
        return Err(err);
    }

    Ok(())
}
