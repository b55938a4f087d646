use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::short_code;

/// Default half length in minutes.
pub const DEFAULT_HALF_LENGTH: i32 = 45;
/// Theme applied when none is stored.
pub const DEFAULT_THEME: &str = "pill";
/// Default primary (home) accent color.
pub const DEFAULT_PRIMARY_COLOR: &str = "#1e3a8a";
/// Default secondary (away) accent color.
pub const DEFAULT_SECONDARY_COLOR: &str = "#2563eb";
/// Timer value of a match that has not started.
pub const ZERO_TIMER: &str = "00:00";

/// The single scoreboard record shared by every display and controller.
///
/// Missing fields in an imported payload fall back to zero values, except for
/// the clock and presentation fields which take the process defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    /// Home team display name.
    #[serde(default)]
    pub home_name: String,
    /// Logo reference, usually an image URL.
    #[serde(default)]
    pub home_logo: String,
    /// Goals scored by the home team.
    #[serde(default)]
    pub home_score: i32,
    /// Away team display name.
    #[serde(default)]
    pub away_name: String,
    /// Logo reference, usually an image URL.
    #[serde(default)]
    pub away_logo: String,
    /// Goals scored by the away team.
    #[serde(default)]
    pub away_score: i32,
    /// `MM:SS` display value as of the last broadcast.
    #[serde(default = "default_timer")]
    pub timer: String,
    /// Whether the clock is advancing.
    #[serde(default)]
    pub running: bool,
    /// Length of one half in minutes.
    #[serde(default = "default_half_length")]
    pub half_length: i32,
    /// Display theme name.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Three-character abbreviation of the home team.
    #[serde(default)]
    pub home_short: String,
    /// Three-character abbreviation of the away team.
    #[serde(default)]
    pub away_short: String,
    /// Home accent color, `#rrggbb`.
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    /// Away accent color, `#rrggbb`.
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    /// Cosmetic flag telling displays to render the teams mirrored.
    #[serde(default)]
    pub sides_flipped: bool,
    /// Active half, starting at 1.
    #[serde(default = "default_half")]
    pub half: i32,
}

impl MatchState {
    /// Record the server boots with.
    pub fn initial() -> Self {
        Self {
            home_name: "Domácí".into(),
            home_logo: String::new(),
            home_score: 0,
            away_name: "Hosté".into(),
            away_logo: String::new(),
            away_score: 0,
            timer: default_timer(),
            running: false,
            half_length: DEFAULT_HALF_LENGTH,
            theme: default_theme(),
            home_short: "DOM".into(),
            away_short: "HOS".into(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            sides_flipped: false,
            half: default_half(),
        }
    }

    /// Re-establish the record invariants that do not depend on the clock.
    ///
    /// Halves below 1 become 1 and unusable abbreviations are regenerated from
    /// the team names.
    pub fn normalize(&mut self) {
        if self.half < 1 {
            self.half = 1;
        }
        self.home_short = short_code::resolve(&self.home_short, &self.home_name);
        self.away_short = short_code::resolve(&self.away_short, &self.away_name);
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::initial()
    }
}

fn default_timer() -> String {
    ZERO_TIMER.into()
}

fn default_half_length() -> i32 {
    DEFAULT_HALF_LENGTH
}

fn default_theme() -> String {
    DEFAULT_THEME.into()
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.into()
}

fn default_secondary_color() -> String {
    DEFAULT_SECONDARY_COLOR.into()
}

fn default_half() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_display_field_names() {
        let value = serde_json::to_value(MatchState::initial()).unwrap();
        assert_eq!(value["homeName"], "Domácí");
        assert_eq!(value["halfLength"], 45);
        assert_eq!(value["sidesFlipped"], false);
        assert_eq!(value["primaryColor"], DEFAULT_PRIMARY_COLOR);
        assert_eq!(value["timer"], "00:00");
    }

    #[test]
    fn missing_fields_take_presence_defaults() {
        let state: MatchState = serde_json::from_value(json!({
            "homeName": "Slavia",
            "homeScore": 2,
        }))
        .unwrap();

        assert_eq!(state.home_name, "Slavia");
        assert_eq!(state.home_score, 2);
        assert_eq!(state.away_name, "");
        assert_eq!(state.timer, ZERO_TIMER);
        assert_eq!(state.half_length, DEFAULT_HALF_LENGTH);
        assert_eq!(state.theme, DEFAULT_THEME);
        assert_eq!(state.half, 1);
        assert_eq!(state.home_short, "");
    }

    #[test]
    fn normalize_fixes_half_and_short_codes() {
        let mut state = MatchState {
            home_name: "Bohemians".into(),
            home_short: "ab1".into(),
            away_name: "Baník".into(),
            away_short: String::new(),
            half: 0,
            ..MatchState::initial()
        };

        state.normalize();

        assert_eq!(state.half, 1);
        assert_eq!(state.home_short, "BOH");
        assert_eq!(state.away_short, "BAN");
    }

    #[test]
    fn normalize_keeps_valid_values() {
        let mut state = MatchState {
            half: 2,
            home_short: "xyz".into(),
            ..MatchState::initial()
        };

        state.normalize();

        assert_eq!(state.half, 2);
        assert_eq!(state.home_short, "XYZ");
        assert_eq!(state.away_short, "HOS");
    }
}
