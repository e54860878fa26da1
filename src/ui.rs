//! Presentación en consola: cabecera, tablas y mensajes de estado.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Row, Table};
use console::style;

use crate::policy::{Action, PolicyResult};

const HEADER_WIDTH: usize = 74;

pub fn render_header() {
    let border = "─".repeat(HEADER_WIDTH - 2);
    println!("\n{}", style(format!("┌{}┐", border)).cyan());
    println!(
        "{}",
        style(format!(
            "│ {:^inner_width$} │",
            "▸ Metadata Cleaner · Limpieza de Metadata ◂",
            inner_width = HEADER_WIDTH - 4
        ))
        .cyan()
        .bold()
    );
    println!("{}\n", style(format!("└{}┘", border)).cyan());
}

pub fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
        .add_attribute(Attribute::Underlined)
}

pub fn label_cell(code: &str, label: &str) -> Cell {
    Cell::new(format!("{code:<5} {label}")).fg(Color::Rgb {
        r: 160,
        g: 196,
        b: 255,
    })
}

pub fn action_cell(action: Action) -> Cell {
    let color = match action {
        Action::Preserve => Color::Green,
        Action::Strip => Color::Yellow,
    };
    Cell::new(action.label()).fg(color)
}

/// Tabla con una fila por categoría aplicable.
pub fn policy_table(policy: &PolicyResult) -> Table {
    let mut table = base_table();
    table.set_header(vec![header_cell("Categoría"), header_cell("Acción")]);
    for directive in policy {
        table.add_row(Row::from(vec![
            label_cell(&directive.category.key().to_uppercase(), directive.category.label()),
            action_cell(directive.action),
        ]));
    }
    table
}

pub fn print_section(title: &str) {
    println!("\n{}", style(format!("┌─ {title} ─")).cyan());
}

pub fn print_line(message: &str) {
    println!("{}", style(format!("│ {message}")).dim());
}

pub fn print_success(message: &str) {
    println!("{}", style(format!("│ ✔ {message}")).green());
}

pub fn print_failure(message: &str) {
    println!("{}", style(format!("│ ✘ {message}")).red());
}

pub fn print_warning(message: &str) {
    println!("{}", style(format!("│ {message}")).yellow());
}

pub fn close_section() {
    println!("{}", style("└─").cyan());
}
