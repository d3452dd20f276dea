use crate::core::{
    client::CatalogClient,
    command_init::{CommandInit, SessionOptions},
    error::Result,
    level::Level,
    print_info, print_section_header,
    records::CatalogSummary,
    source::CatalogSource,
};
use colored::*;

pub async fn execute_summary(options: &SessionOptions) -> Result<()> {
    let config = CommandInit::load_config(options)?;
    let client = CatalogClient::new(&config)?;
    let summary = client.summary().await?;

    print_section_header("Catalog");
    for line in render_summary(&summary) {
        println!("{line}");
    }
    if summary.forecast_types.is_empty() {
        print_info("No forecast types reported.");
    } else {
        println!();
    }
    Ok(())
}

fn render_summary(summary: &CatalogSummary) -> Vec<String> {
    let availability = if summary.available {
        "available".green()
    } else {
        "unavailable".red()
    };
    let mut lines = vec![format!(
        "Storage: {} ({availability})",
        summary.storage_path.blue()
    )];

    for forecast in &summary.forecast_types {
        let counts = [
            (Level::Province, forecast.city_count.unwrap_or(0)),
            (Level::District, forecast.district_count.unwrap_or(0)),
            (Level::Town, forecast.town_count.unwrap_or(0)),
        ];
        let total: u64 = counts.iter().map(|(_, count)| count).sum();

        lines.push(String::new());
        lines.push(format!(
            "{} {} {}",
            "➤".cyan(),
            forecast.name.cyan(),
            format!("총 {total}개 행정 구역 데이터").bright_black()
        ));
        for (level, count) in counts {
            lines.push(format!("   {:<8} {count}곳", level.title()));
        }
    }
    lines
}
