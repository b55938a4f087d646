//! Payloads for deriving accent colors from team logos.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Logo URLs to sample, accepted both as query string and JSON body.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase", default)]
pub struct DeriveColorsRequest {
    /// Single image to sample; takes precedence over the team logos.
    pub url: Option<String>,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
}

/// Average color of a single image.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct SingleColor {
    /// Lowercase `#rrggbb`.
    pub color: String,
}

/// Average colors of the home and away logos.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColorPair {
    /// Home logo color, empty when the image could not be used.
    pub primary_color: String,
    /// Away logo color, empty when the image could not be used.
    pub secondary_color: String,
}

/// Average colors computed from the requested images.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum DeriveColorsResponse {
    /// Result for a single `url`.
    Single(SingleColor),
    /// Result for a logo pair.
    Pair(ColorPair),
}
