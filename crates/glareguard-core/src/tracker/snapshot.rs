use serde::{Deserialize, Serialize};

use crate::exposure::{classify_blue_light, format_time, protection_score, BlueLightLevel};

/// Everything a presentation layer needs to render the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureSnapshot {
    /// Minutes of foreground use today.
    pub today_total: u64,
    pub blue_light_level: BlueLightLevel,
    pub protection_score: u8,
    pub is_active: bool,
    pub blue_filter_enabled: bool,
    pub break_reminders_enabled: bool,
    pub formatted_time: String,
}

impl ExposureSnapshot {
    /// Derive a snapshot from today's total and the local hour.
    pub fn from_total(
        today_total: u64,
        hour: u32,
        is_active: bool,
        blue_filter_enabled: bool,
        break_reminders_enabled: bool,
    ) -> Self {
        let blue_light_level = classify_blue_light(today_total, hour);
        Self {
            today_total,
            blue_light_level,
            protection_score: protection_score(today_total, blue_light_level),
            is_active,
            blue_filter_enabled,
            break_reminders_enabled,
            formatted_time: format_time(today_total),
        }
    }
}

impl Default for ExposureSnapshot {
    /// Zero usage, Low risk, full score, reminders on.
    fn default() -> Self {
        Self {
            today_total: 0,
            blue_light_level: BlueLightLevel::Low,
            protection_score: 100,
            is_active: false,
            blue_filter_enabled: false,
            break_reminders_enabled: true,
            formatted_time: format_time(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_web_field_names() {
        let snap = ExposureSnapshot::from_total(90, 10, true, false, true);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["todayTotal"], 90);
        assert_eq!(json["blueLightLevel"], "Low");
        assert_eq!(json["protectionScore"], 91);
        assert_eq!(json["formattedTime"], "1.5h");
        assert_eq!(json["breakRemindersEnabled"], true);
    }
}
