//! Presentation-facing buckets and recommendations derived from a snapshot.

use serde::{Deserialize, Serialize};

use super::BlueLightLevel;
use crate::tracker::ExposureSnapshot;

/// How today's screen time compares to healthy use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenTimeTier {
    Healthy,
    Elevated,
    Excessive,
}

impl ScreenTimeTier {
    pub fn from_minutes(total_minutes: u64) -> Self {
        if total_minutes >= 480 {
            ScreenTimeTier::Excessive
        } else if total_minutes >= 300 {
            ScreenTimeTier::Elevated
        } else {
            ScreenTimeTier::Healthy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionTier {
    Good,
    Fair,
    Poor,
}

impl ProtectionTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ProtectionTier::Good
        } else if score >= 60 {
            ProtectionTier::Fair
        } else {
            ProtectionTier::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    TakeBreaks,
    ReduceBlueLight,
    LowerBrightness,
    NightMode,
}

impl Recommendation {
    pub fn message(self) -> &'static str {
        match self {
            Recommendation::TakeBreaks => {
                "You've been on screens for over 4 hours. Follow the 20-20-20 rule."
            }
            Recommendation::ReduceBlueLight => {
                "Blue light exposure is high. Turn on the blue light filter."
            }
            Recommendation::LowerBrightness => {
                "Lower your screen brightness and increase the distance to your screen."
            }
            Recommendation::NightMode => {
                "It's getting late. Switch to night mode and wind down."
            }
        }
    }
}

/// Advice for the current snapshot at the given local hour, most urgent first.
pub fn recommendations(snapshot: &ExposureSnapshot, hour: u32) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    if snapshot.today_total > 240 {
        recs.push(Recommendation::TakeBreaks);
    }
    if snapshot.blue_light_level == BlueLightLevel::High {
        recs.push(Recommendation::ReduceBlueLight);
    }
    if snapshot.protection_score < 60 {
        recs.push(Recommendation::LowerBrightness);
    }
    if hour >= 20 {
        recs.push(Recommendation::NightMode);
    }
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_time_tiers() {
        assert_eq!(ScreenTimeTier::from_minutes(0), ScreenTimeTier::Healthy);
        assert_eq!(ScreenTimeTier::from_minutes(299), ScreenTimeTier::Healthy);
        assert_eq!(ScreenTimeTier::from_minutes(300), ScreenTimeTier::Elevated);
        assert_eq!(ScreenTimeTier::from_minutes(480), ScreenTimeTier::Excessive);
    }

    #[test]
    fn protection_tiers() {
        assert_eq!(ProtectionTier::from_score(100), ProtectionTier::Good);
        assert_eq!(ProtectionTier::from_score(80), ProtectionTier::Good);
        assert_eq!(ProtectionTier::from_score(79), ProtectionTier::Fair);
        assert_eq!(ProtectionTier::from_score(60), ProtectionTier::Fair);
        assert_eq!(ProtectionTier::from_score(59), ProtectionTier::Poor);
    }

    #[test]
    fn fresh_morning_has_no_advice() {
        let snap = ExposureSnapshot::from_total(0, 9, false, true, true);
        assert!(recommendations(&snap, 9).is_empty());
    }

    #[test]
    fn heavy_evening_gets_everything() {
        let snap = ExposureSnapshot::from_total(600, 21, true, false, true);
        // 600 min at 21h -> Medium, score 100-60-10 = 30
        assert_eq!(
            recommendations(&snap, 21),
            vec![
                Recommendation::TakeBreaks,
                Recommendation::LowerBrightness,
                Recommendation::NightMode,
            ]
        );
    }

    #[test]
    fn high_level_suggests_filter() {
        let snap = ExposureSnapshot::from_total(500, 14, true, false, true);
        let recs = recommendations(&snap, 14);
        assert!(recs.contains(&Recommendation::ReduceBlueLight));
        assert!(!recs.contains(&Recommendation::NightMode));
    }
}
