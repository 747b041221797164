//! Ranking summary table
//!
//! Fixed-width text table of the best and worst ranked provinces.

use crate::models::IndexRecord;

/// Rows shown from each end of the ranking
pub const SUMMARY_ROWS: usize = 5;

fn header(with_real: bool) -> Vec<String> {
    if with_real {
        vec![
            format!(
                "{:<8}  {:>6}  {:>6}  {:>7}  {:>6}  {:>6}",
                "Province", "Wage", "Real", "Basket", "Index", "Real"
            ),
            format!(
                "{}  {}  {}  {}  {}  {}",
                "─".repeat(8),
                "─".repeat(6),
                "─".repeat(6),
                "─".repeat(7),
                "─".repeat(6),
                "─".repeat(6)
            ),
        ]
    } else {
        vec![
            format!(
                "{:<8}  {:>6}  {:>7}  {:>6}",
                "Province", "Wage", "Basket", "Index"
            ),
            format!(
                "{}  {}  {}  {}",
                "─".repeat(8),
                "─".repeat(6),
                "─".repeat(7),
                "─".repeat(6)
            ),
        ]
    }
}

fn row(record: &IndexRecord) -> String {
    match (record.real_wage, record.real_index) {
        (Some(real_wage), Some(real_index)) => format!(
            "{:<8}  ¥{:>5.1}  ¥{:>5.2}  ¥{:>6.2}  {:>6.2}  {:>6.2}",
            record.name, record.wage, real_wage, record.basket_price, record.index, real_index
        ),
        _ => format!(
            "{:<8}  ¥{:>5.1}  ¥{:>6.2}  {:>6.2}",
            record.name, record.wage, record.basket_price, record.index
        ),
    }
}

/// Summary lines: top and bottom of the ranking, or every row when short
pub fn summary_lines(records: &[IndexRecord]) -> Vec<String> {
    let with_real = records.iter().any(|r| r.real_index.is_some());
    let mut lines = header(with_real);

    if records.len() <= SUMMARY_ROWS * 2 {
        lines.extend(records.iter().map(row));
        return lines;
    }

    lines.extend(records[..SUMMARY_ROWS].iter().map(row));
    lines.push(format!(
        "... ({} more) ...",
        records.len() - SUMMARY_ROWS * 2
    ));
    lines.extend(records[records.len() - SUMMARY_ROWS..].iter().map(row));
    lines
}

/// Log the summary table at info level
pub fn log_summary(records: &[IndexRecord]) {
    for line in summary_lines(records) {
        tracing::info!("{}", line);
    }
}
