use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hitop_cli::report::{QuestionnaireSummary, ScoresResult, spectrum_rows};
use hitop_model::SpectrumDictionary;

pub fn print_questionnaires(summaries: &[QuestionnaireSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Phase"),
        header_cell("Questionnaire"),
        header_cell("Patients"),
        header_cell("Items"),
        header_cell("Diagnoses"),
        header_cell("Answers"),
    ]);
    apply_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_answers = 0usize;
    for summary in summaries {
        total_answers += summary.answers;
        table.add_row(vec![
            dim_cell(summary.phase.as_str()),
            Cell::new(&summary.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.patients),
            Cell::new(summary.item_columns),
            count_cell(summary.diagnosis_columns),
            Cell::new(summary.answers),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} questionnaires", summaries.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_answers).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_spectra(dictionary: &SpectrumDictionary, show_codes: bool) {
    let mut table = Table::new();
    let mut header = vec![header_cell("Spectrum"), header_cell("Codes"), header_cell("Shared")];
    if show_codes {
        header.push(header_cell("Members"));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in spectrum_rows(dictionary) {
        let name = if row.spectrum.is_reverse_keyed() {
            dim_cell(row.spectrum.name())
        } else {
            Cell::new(row.spectrum.name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        };
        let mut cells = vec![name, Cell::new(row.codes.len()), count_cell(row.shared)];
        if show_codes {
            cells.push(Cell::new(row.codes.join(", ")));
        }
        table.add_row(cells);
    }
    println!("{table}");
}

pub fn print_scores(result: &ScoresResult) {
    println!("Patients: {}", result.patients);
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Spectrum"),
        header_cell("Items"),
        header_cell("Scored"),
        header_cell("Mean score"),
    ]);
    apply_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in &result.summaries {
        table.add_row(vec![
            Cell::new(summary.spectrum.name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.items),
            Cell::new(summary.patients_scored),
            match summary.mean_score {
                Some(mean) => Cell::new(format!("{mean:.3}")),
                None => dim_cell("-"),
            },
        ]);
    }
    for spectrum in &result.skipped {
        table.add_row(vec![
            dim_cell(spectrum.name()),
            dim_cell(0),
            dim_cell("-"),
            Cell::new("no valid columns").fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
