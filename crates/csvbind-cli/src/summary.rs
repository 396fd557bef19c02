use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csvbind_cli::pipeline::ImportReport;

pub fn print_report(report: &ImportReport) {
    println!("{}", render_outcomes(report));
    println!();
    println!("{}", summary_table(report));
}

/// Mapping errors followed by one VALID/INVALID line per record.
pub fn render_outcomes(report: &ImportReport) -> String {
    let mut lines = Vec::new();
    if !report.mapping_errors.is_empty() {
        lines.push("Mapping errors:".to_string());
        for error in &report.mapping_errors {
            lines.push(format!("  - {error}"));
        }
        lines.push(String::new());
    }
    for record in &report.records {
        let status = if record.is_valid() { "VALID" } else { "INVALID" };
        lines.push(format!("Record {}: {status}", record.number));
        for error in &record.errors {
            lines.push(format!("  - {}", error.message));
        }
    }
    if report.records.is_empty() {
        lines.push("No records.".to_string());
    }
    lines.join("\n")
}

fn summary_table(report: &ImportReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell("Records"),
            header_cell("Valid"),
            header_cell("Invalid"),
            header_cell("Mapping errors"),
        ]);
    table.add_row(vec![
        Cell::new(report.records.len()).add_attribute(Attribute::Bold),
        count_cell(report.valid_count, Color::Green),
        count_cell(report.invalid_count, Color::Red),
        count_cell(report.mapping_errors.len(), Color::Yellow),
    ]);
    for index in 0..4 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

#[cfg(test)]
mod tests {
    use csvbind_cli::config::{Model, ModelConfig};
    use csvbind_cli::pipeline::run_import_str;

    use super::*;

    fn users_model() -> Model {
        toml::from_str::<ModelConfig>(
            r#"
            [[field]]
            name = "Username"
            column = "Username"
            type = "string"
            rules = [{ kind = "required" }, { kind = "string_length", min = 3, max = 50 }]

            [[field]]
            name = "Email"
            column = "Email"
            type = "string"
            rules = [{ kind = "required" }, { kind = "string_length", min = 5, max = 100 }]

            [[field]]
            name = "Age"
            column = "Age"
            type = "int"
            optional = true
            rules = [{ kind = "required" }, { kind = "range", min = 0.0, max = 150.0 }]
            "#,
        )
        .unwrap()
        .into_model()
        .unwrap()
    }

    #[test]
    fn test_render_outcomes() {
        let report = run_import_str(
            "Username,Email,Age\n\
             alice,alice@example.com,30\n\
             c,short@example.com,17\n\
             dave,dave@example.com,notanumber\n\
             frank, ,40\n",
            &users_model(),
        );

        insta::assert_snapshot!(render_outcomes(&report), @r"
        Mapping errors:
          - line 4: cannot convert value 'notanumber' to integer for field 'Age': invalid integer

        Record 1: VALID
        Record 2: INVALID
          - Username length must be at least 3.
        Record 3: INVALID
          - Age is required.
        Record 4: INVALID
          - Email is required.
          - Email length must be at least 5.
        ");
    }

    #[test]
    fn test_render_empty_source() {
        let report = run_import_str("", &users_model());
        insta::assert_snapshot!(render_outcomes(&report), @r"
        Mapping errors:
          - source is empty

        No records.
        ");
    }

    #[test]
    fn test_summary_table_counts() {
        let report = run_import_str(
            "Username,Email,Age\nalice,alice@example.com,30\n",
            &users_model(),
        );
        let rendered = summary_table(&report).to_string();
        assert!(rendered.contains("Records"));
        assert!(rendered.contains("Mapping errors"));
        assert!(rendered.contains('1'));
    }
}
