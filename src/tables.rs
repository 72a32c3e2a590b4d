use comfy_table::{Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::UtilizationPoint;

#[must_use]
pub fn build_series_table(series: &[UtilizationPoint]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Time", "Utilization"]);
    for point in series {
        table.add_row(vec![
            Cell::new(point.time.format("%Y-%m-%d %H:%M")),
            Cell::new(format!("{:.1} %", point.percentage))
                .set_alignment(CellAlignment::Right)
                .fg(if point.percentage >= 75.0 {
                    Color::Green
                } else if point.percentage >= 25.0 {
                    Color::DarkYellow
                } else {
                    Color::Red
                }),
        ]);
    }
    table
}
