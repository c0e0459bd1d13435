use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use schedule_core::config::ScheduleConfig;
use schedule_core::constants::ICS_MEDIA_TYPE;

pub fn run(config: &ScheduleConfig, config_override: Option<&Path>) -> Result<()> {
    let config_path = match config_override {
        Some(path) => path.to_path_buf(),
        None => ScheduleConfig::config_path()?,
    };

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!("  Output:  {}", output_line(config));

    println!();
    println!("{}", "Calendar".bold());
    println!("  Name:         {}", config.calendar_name);
    println!("  Timezone:     {}", config.timezone);
    println!("  Date layout:  {:?}", config.date_layout);
    println!("  Strict dates: {}", config.strict_dates);

    Ok(())
}

/// Output path with the media type of the file written there.
fn output_line(config: &ScheduleConfig) -> String {
    format!("{} ({})", config.output_path().display(), ICS_MEDIA_TYPE)
}
