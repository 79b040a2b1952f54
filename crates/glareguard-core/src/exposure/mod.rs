//! Pure exposure math.
//!
//! Everything in here is a function of `(total_minutes, hour_of_day)` and
//! nothing else, so the tracker can recompute derived fields on every flush
//! without keeping them around.

mod advice;

pub use advice::{recommendations, ProtectionTier, Recommendation, ScreenTimeTier};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// More than this many minutes counts as a heavy day (8 hours).
pub const HEAVY_USAGE_MIN: u64 = 480;
/// More than this many minutes counts as moderate use (4 hours).
pub const MODERATE_USAGE_MIN: u64 = 240;

/// Lower bound of the protection score.
pub const MIN_PROTECTION_SCORE: u8 = 10;
/// Upper bound of the protection score.
pub const MAX_PROTECTION_SCORE: u8 = 100;

/// Coarse blue-light risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlueLightLevel {
    Low,
    Medium,
    High,
}

impl BlueLightLevel {
    /// Points subtracted from the usage-based protection score.
    pub fn score_penalty(self) -> f64 {
        match self {
            BlueLightLevel::Low => 0.0,
            BlueLightLevel::Medium => 10.0,
            BlueLightLevel::High => 20.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BlueLightLevel::Low => "Minimal exposure",
            BlueLightLevel::Medium => "Moderate exposure",
            BlueLightLevel::High => "High exposure - consider a filter",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlueLightLevel::Low => "Low",
            BlueLightLevel::Medium => "Medium",
            BlueLightLevel::High => "High",
        }
    }
}

impl std::fmt::Display for BlueLightLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_daytime(hour: u32) -> bool {
    (6..=18).contains(&hour)
}

fn is_evening(hour: u32) -> bool {
    (19..=23).contains(&hour)
}

/// Classify blue-light exposure from today's usage and the local hour.
///
/// Daytime is 06:00-18:59, evening 19:00-23:59; anything else is night.
/// Thresholds are strict, so exactly 240 or 480 minutes stay in the lower
/// usage bracket.
pub fn classify_blue_light(total_minutes: u64, hour: u32) -> BlueLightLevel {
    let day = is_daytime(hour);
    let evening = is_evening(hour);

    if total_minutes > HEAVY_USAGE_MIN {
        if day {
            BlueLightLevel::High
        } else {
            BlueLightLevel::Medium
        }
    } else if total_minutes > MODERATE_USAGE_MIN {
        if day {
            BlueLightLevel::Medium
        } else if evening {
            BlueLightLevel::High
        } else {
            BlueLightLevel::Low
        }
    } else if evening {
        BlueLightLevel::Medium
    } else {
        BlueLightLevel::Low
    }
}

/// Same as [`classify_blue_light`] but rejects hours outside `0..=23`.
pub fn try_classify_blue_light(
    total_minutes: u64,
    hour: u32,
) -> Result<BlueLightLevel, ValidationError> {
    if hour > 23 {
        return Err(ValidationError::InvalidHour(hour));
    }
    Ok(classify_blue_light(total_minutes, hour))
}

/// Derive the 10-100 protection score.
///
/// Usage costs one point per ten minutes (fractional), then the level
/// penalty is applied before rounding and clamping.
pub fn protection_score(total_minutes: u64, level: BlueLightLevel) -> u8 {
    let base = (100.0 - total_minutes as f64 / 10.0).max(0.0);
    let score = (base - level.score_penalty()).round();
    score.clamp(MIN_PROTECTION_SCORE as f64, MAX_PROTECTION_SCORE as f64) as u8
}

/// Render minutes for display: `"45m"` below an hour, `"2.5h"` above.
///
/// The decimal is the leftover minutes in tenths of an hour, rounded, so
/// 57-59 leftover minutes render as `.10`.
pub fn format_time(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let mins = total_minutes % 60;
    if hours > 0 {
        let tenths = (mins as f64 / 6.0).round() as u64;
        format!("{hours}.{tenths}h")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heavy_daytime_use_is_high() {
        assert_eq!(classify_blue_light(500, 14), BlueLightLevel::High);
        assert_eq!(classify_blue_light(481, 6), BlueLightLevel::High);
        assert_eq!(classify_blue_light(481, 18), BlueLightLevel::High);
    }

    #[test]
    fn heavy_use_outside_daytime_is_medium() {
        assert_eq!(classify_blue_light(600, 21), BlueLightLevel::Medium);
        assert_eq!(classify_blue_light(600, 3), BlueLightLevel::Medium);
    }

    #[test]
    fn moderate_use_depends_on_time_of_day() {
        assert_eq!(classify_blue_light(300, 10), BlueLightLevel::Medium);
        assert_eq!(classify_blue_light(300, 20), BlueLightLevel::High);
        assert_eq!(classify_blue_light(300, 2), BlueLightLevel::Low);
    }

    #[test]
    fn light_use_is_medium_only_in_the_evening() {
        assert_eq!(classify_blue_light(100, 21), BlueLightLevel::Medium);
        assert_eq!(classify_blue_light(100, 12), BlueLightLevel::Low);
        assert_eq!(classify_blue_light(0, 0), BlueLightLevel::Low);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify_blue_light(480, 12), BlueLightLevel::Medium);
        assert_eq!(classify_blue_light(240, 12), BlueLightLevel::Low);
        assert_eq!(classify_blue_light(240, 20), BlueLightLevel::Medium);
    }

    #[test]
    fn try_classify_rejects_bad_hour() {
        assert!(try_classify_blue_light(10, 24).is_err());
        assert_eq!(try_classify_blue_light(10, 23).unwrap(), BlueLightLevel::Medium);
    }

    #[test]
    fn score_scenarios() {
        let level = classify_blue_light(500, 14);
        assert_eq!(protection_score(500, level), 30);

        let level = classify_blue_light(100, 21);
        assert_eq!(protection_score(100, level), 80);

        assert_eq!(protection_score(0, BlueLightLevel::Low), 100);
        assert_eq!(protection_score(5_000, BlueLightLevel::High), 10);
    }

    #[test]
    fn score_rounds_fractional_usage() {
        // 100 - 4.5 = 95.5 -> 96
        assert_eq!(protection_score(45, BlueLightLevel::Low), 96);
        // 100 - 4.4 = 95.6 -> 96
        assert_eq!(protection_score(44, BlueLightLevel::Low), 96);
        // 100 - 4.6 = 95.4 -> 95
        assert_eq!(protection_score(46, BlueLightLevel::Low), 95);
    }

    #[test]
    fn format_time_examples() {
        assert_eq!(format_time(0), "0m");
        assert_eq!(format_time(59), "59m");
        assert_eq!(format_time(60), "1.0h");
        assert_eq!(format_time(90), "1.5h");
        assert_eq!(format_time(125), "2.1h");
        assert_eq!(format_time(119), "1.10h");
    }
}
