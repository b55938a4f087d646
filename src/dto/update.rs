//! Controller payload for editing the non-clock fields of the scoreboard.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::validation::validate_hex_color;

/// Partial update of identity, score, theme and color fields.
///
/// Omitted fields keep their current value. Clock fields (`timer`, `running`,
/// `half`) are not part of this payload and are silently ignored if sent; they
/// only change through the timer endpoints.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub home_name: Option<String>,
    pub home_logo: Option<String>,
    pub home_score: Option<i32>,
    pub away_name: Option<String>,
    pub away_logo: Option<String>,
    pub away_score: Option<i32>,
    /// Half length in minutes.
    pub half_length: Option<i32>,
    pub theme: Option<String>,
    /// Requested abbreviation; invalid values are replaced by one derived from the name.
    pub home_short: Option<String>,
    /// Requested abbreviation; invalid values are replaced by one derived from the name.
    pub away_short: Option<String>,
    /// Hex color; an empty string keeps the current color.
    #[validate(custom(function = "validate_hex_color"))]
    pub primary_color: Option<String>,
    /// Hex color; an empty string keeps the current color.
    #[validate(custom(function = "validate_hex_color"))]
    pub secondary_color: Option<String>,
}
