pub mod monthly_report;
