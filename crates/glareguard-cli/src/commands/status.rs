use chrono::{Local, Timelike};
use glareguard_core::{
    recommendations, ExposureSnapshot, ProtectionTier, Recommendation, ScreenTimeTier,
};
use serde::Serialize;

use crate::host::open_store;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    #[serde(flatten)]
    snapshot: ExposureSnapshot,
    blue_light_description: &'static str,
    screen_time_tier: ScreenTimeTier,
    protection_tier: ProtectionTier,
    recommendations: Vec<RecommendationLine>,
}

#[derive(Serialize)]
struct RecommendationLine {
    id: Recommendation,
    message: &'static str,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store();
    let now = Local::now();
    let total = store.total_for(now.date_naive());
    let prefs = store.preferences();

    let snapshot = ExposureSnapshot::from_total(
        total,
        now.hour(),
        false,
        prefs.blue_filter_enabled,
        prefs.break_reminders_enabled,
    );
    let report = StatusReport {
        blue_light_description: snapshot.blue_light_level.description(),
        screen_time_tier: ScreenTimeTier::from_minutes(snapshot.today_total),
        protection_tier: ProtectionTier::from_score(snapshot.protection_score),
        recommendations: recommendations(&snapshot, now.hour())
            .into_iter()
            .map(|id| RecommendationLine {
                id,
                message: id.message(),
            })
            .collect(),
        snapshot,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
