use maintlog_core::{MaintenanceKind, MonthSummary};
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Total")]
    total: u64,
    #[tabled(rename = "Preventive")]
    preventive: u64,
    #[tabled(rename = "Repair")]
    repair: u64,
    #[tabled(rename = "Emergency")]
    emergency: u64,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Departments")]
    departments: String,
}

impl From<&MonthSummary> for MonthRow {
    fn from(summary: &MonthSummary) -> Self {
        Self {
            month: summary.month_key.clone(),
            total: summary.total,
            preventive: summary.by_type.get(MaintenanceKind::Preventive),
            repair: summary.by_type.get(MaintenanceKind::Repair),
            emergency: summary.emergency_count,
            hours: format!("{:.1}", summary.total_hours),
            departments: format_departments(summary),
        }
    }
}

fn format_departments(summary: &MonthSummary) -> String {
    summary
        .by_department
        .iter()
        .map(|(name, count)| format!("{}: {}", name, count))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn show_report(summaries: &[MonthSummary]) {
    if summaries.is_empty() {
        println!("No maintenance records in range.");
        return;
    }

    let rows: Vec<MonthRow> = summaries.iter().map(MonthRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Columns::new(1..6)).with(Alignment::right()))
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    let total: u64 = summaries.iter().map(|s| s.total).sum();
    let hours: f64 = summaries.iter().map(|s| s.total_hours).sum();
    let emergencies: u64 = summaries.iter().map(|s| s.emergency_count).sum();

    println!("{}", table);
    println!(
        "\x1b[1;36m{} months\x1b[0m  {} records, {:.1}h labor, {} emergencies",
        summaries.len(),
        total,
        hours,
        emergencies
    );
}
