use comfy_table::{Attribute, Cell, Color, Row, Table};
use recur_core::{MinimalEventRecord, OccurrenceRecord, RuleSnapshot};

pub fn display_occurrences(records: &[OccurrenceRecord], date_format: &str) {
    if records.is_empty() {
        println!("No occurrences found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Occurrence", "Day", "Date", "Month", "Year"]);

    for record in records {
        let mut row = Row::new();

        let mut index_cell = Cell::new(record.repeat_index());
        if record.is_original() {
            index_cell = index_cell.fg(Color::Green).add_attribute(Attribute::Bold);
        }
        row.add_cell(index_cell);

        let mut when = record.occurrence_time().format(date_format).to_string();
        if record.is_original() {
            when.push_str(" (Original)");
        }
        row.add_cell(Cell::new(when));

        let day_cell = match record.weekday_code() {
            "sa" | "su" => Cell::new(record.weekday_code()).fg(Color::Yellow),
            code => Cell::new(code),
        };
        row.add_cell(day_cell);

        row.add_cell(Cell::new(record.day_of_month()));
        row.add_cell(Cell::new(format!(
            "{} ({})",
            record.month_name(),
            record.month_number()
        )));
        row.add_cell(Cell::new(record.year()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_snapshot(snapshot: &RuleSnapshot, date_format: &str) {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Start".to_string(), snapshot.start().format(date_format).to_string()]);
    table.add_row(vec!["Until".to_string(), snapshot.until().format(date_format).to_string()]);
    table.add_row(vec!["Frequency".to_string(), snapshot.frequency().to_string()]);
    table.add_row(vec!["Interval".to_string(), snapshot.interval().to_string()]);
    table.add_row(vec!["Count".to_string(), snapshot.count().to_string()]);
    table.add_row(vec!["Rule".to_string(), snapshot.canonical_text().to_string()]);

    println!("{table}");
}

pub fn display_fields(record: &MinimalEventRecord<'_>, timezone_abbreviation: &str) {
    let fields = record.fields();

    let mut table = Table::new();
    table.set_header(vec!["Weekday", "Day", "Month", "Month #", "Year", "Zone", "Position"]);
    table.add_row(vec![
        Cell::new(fields.weekday_code),
        Cell::new(fields.day_of_month),
        Cell::new(fields.month_name),
        Cell::new(fields.month_number),
        Cell::new(fields.year),
        Cell::new(timezone_abbreviation),
        match record.position() {
            Some(position) => Cell::new(position).fg(Color::Green),
            None => Cell::new("-"),
        },
    ]);

    println!("{table}");
}
