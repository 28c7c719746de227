use itertools::Itertools;

use crate::results::{ResultSet, Row};

pub fn draw_table(results: &ResultSet) -> String {
    render(results.columns(), results.rows())
}

/// Renders a bordered text table.
///
/// Each column is as wide as its name. Values are not measured, so a value
/// longer than its header pushes the rest of its line out of alignment with
/// the borders. This is a known limitation of the layout and changing it
/// changes the printed output.
pub fn render(columns: &[String], rows: &[Row]) -> String {
    let separator = format!(
        "+{}+",
        columns
            .iter()
            .map(|column| "-".repeat(column.chars().count()))
            .join("+")
    );

    let mut table = String::new();
    table.push_str(&separator);
    table.push('\n');
    table.push_str(&format!("| {} |\n", columns.iter().join(" | ")));
    table.push_str(&separator);
    table.push('\n');
    for row in rows {
        table.push_str(&format!("| {} |\n", row.iter().join(" | ")));
    }
    table.push_str(&separator);
    table.push('\n');
    table
}
