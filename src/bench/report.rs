//! Report formatting

use crate::types::RunReport;

/// Format a report as a comparison table, fastest first
pub fn format_report(report: &RunReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{:<24} {:>18} {:>10} {:>8}\n",
        "Library", "Ops/sec", "RME (%)", "Samples"
    ));
    output.push_str(&format!("{}\n", "=".repeat(63)));

    for stats in report.ranked() {
        output.push_str(&format!(
            "{:<24} {:>18} {:>10} {:>8}\n",
            stats.name,
            group_digits(stats.ops_per_sec),
            format!("±{:.2}%", stats.rme_percent),
            stats.sample_count
        ));
    }

    output.push_str(&format!("\n🏆 Fastest is → {}\n", report.fastest));
    output
}

/// Format a report as JSON
pub fn format_report_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// `1234567.891` -> `1,234,567.89`
fn group_digits(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}
