use std::collections::BTreeSet;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vizboard_client::{DashboardList, Library};
use vizboard_model::{Status, Visualisation};
use vizboard_validate::{DatasetLookup, Readiness, ViewerFrame};

use crate::commands::CheckReport;

pub fn print_check_report(report: &CheckReport) {
    let vis = &report.visualisation;
    println!("Visualisation: {} ({})", vis.name, vis.id);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Result")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Type"),
        Cell::new(vis.visualisation_type.display_label()),
    ]);
    table.add_row(vec![Cell::new("Renderable"), readiness_cell(&report.readiness)]);
    table.add_row(vec![Cell::new("Persistable"), flag_cell(report.persistable)]);
    table.add_row(vec![Cell::new("Preview size"), Cell::new(frame_label(report.frame))]);
    table.add_row(vec![
        Cell::new("Datasets"),
        list_cell(&report.dependencies),
    ]);
    table.add_row(vec![Cell::new("Not loaded"), list_cell(&report.missing)]);
    println!("{table}");
}

pub fn print_dependencies(ids: &BTreeSet<String>) {
    if ids.is_empty() {
        println!("No dataset dependencies.");
        return;
    }
    for id in ids {
        println!("{id}");
    }
}

pub fn print_fetch_report(vis: &Visualisation, readiness: &Readiness, library: &Library) {
    println!("Visualisation: {} ({})", vis.name, vis.id);
    println!("Renderable: {}", readiness_label(readiness));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Name"),
        header_cell("Columns"),
        header_cell("Rows"),
        header_cell("Loaded"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for id in vizboard_validate::resolve_dataset_ids(vis) {
        let dataset = library.datasets.get(&id);
        let columns = dataset.and_then(|d| d.columns.as_ref()).map(Vec::len);
        let rows = dataset.and_then(|d| d.rows.as_ref()).map(Vec::len);
        let name = dataset.and_then(|d| d.name.clone());
        table.add_row(vec![
            Cell::new(&id),
            name.map_or_else(|| dim_cell("-"), Cell::new),
            columns.map_or_else(|| dim_cell("-"), Cell::new),
            rows.map_or_else(|| dim_cell("-"), Cell::new),
            flag_cell(library.is_dataset_loaded(&id)),
        ]);
    }
    println!("{table}");
}

pub fn print_visualisation_list(list: &DashboardList<'_>) {
    if list.library_empty {
        println!("No visualisations to show.");
        return;
    }
    if list.no_matches {
        println!("No visualisations match your filter.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Modified"),
        header_cell("Status"),
        header_cell("On dashboard"),
        header_cell("Data last updated"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Center);
    for entry in &list.entries {
        let vis = entry.visualisation;
        let modified = vis
            .modified_at()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string());
        table.add_row(vec![
            Cell::new(&vis.id),
            Cell::new(&vis.name).add_attribute(Attribute::Bold),
            Cell::new(&entry.type_label),
            modified.map_or_else(|| dim_cell("-"), Cell::new),
            status_cell(vis.status),
            if entry.on_dashboard {
                Cell::new("✓").fg(Color::Green)
            } else {
                dim_cell("")
            },
            entry
                .data_last_updated
                .as_ref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

pub fn readiness_label(readiness: &Readiness) -> String {
    match readiness {
        Readiness::Ready => "yes".to_string(),
        Readiness::UnknownType { visualisation_type } => {
            format!("no, unknown type `{visualisation_type}`")
        }
        Readiness::DatasetNotLoaded { dataset_id } => match dataset_id {
            Some(id) => format!("no, dataset {id} is not loaded"),
            None => "no, no dataset selected".to_string(),
        },
        Readiness::MissingFields { fields } => format!("no, missing {}", fields.join(", ")),
    }
}

fn readiness_cell(readiness: &Readiness) -> Cell {
    let cell = Cell::new(readiness_label(readiness));
    if readiness.is_ready() {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Yellow)
    }
}

fn frame_label(frame: ViewerFrame) -> String {
    match (frame.width, frame.height) {
        (Some(width), Some(height)) => format!("{width} x {height}"),
        _ => "fills container".to_string(),
    }
}

fn status_cell(status: Option<Status>) -> Cell {
    match status {
        Some(Status::Ok) => Cell::new("OK").fg(Color::Green),
        Some(Status::Pending) => Cell::new("PENDING").fg(Color::Yellow),
        None => dim_cell("-"),
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Red)
    }
}

fn list_cell(ids: &BTreeSet<String>) -> Cell {
    if ids.is_empty() {
        return dim_cell("-");
    }
    Cell::new(ids.iter().cloned().collect::<Vec<_>>().join(", "))
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
