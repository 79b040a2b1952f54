use clap::Args;
use glareguard_core::exposure::try_classify_blue_light;
use glareguard_core::{format_time, protection_score};
use serde_json::json;

#[derive(Args)]
pub struct ScoreArgs {
    /// Minutes of screen time today
    #[arg(long)]
    pub minutes: u64,
    /// Local hour of day (0-23)
    #[arg(long)]
    pub hour: u32,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let level = try_classify_blue_light(args.minutes, args.hour)?;
    let out = json!({
        "todayTotal": args.minutes,
        "blueLightLevel": level,
        "protectionScore": protection_score(args.minutes, level),
        "formattedTime": format_time(args.minutes),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
