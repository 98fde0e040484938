//! Rendering for `--output`: rounded tables, JSON, YAML and bare ids.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

// ── Color ──

/// `auto` colors only an interactive stdout without `NO_COLOR`.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// "Page X of Y" line shown under paged tables.
pub fn page_footer(page: usize, page_count: usize, matched: usize, color: bool) -> String {
    let text = format!("Page {page} of {} ({matched} matching)", page_count.max(1));
    if color {
        text.dimmed().to_string()
    } else {
        text
    }
}

// ── Renderers ──

/// Render a collection. Tables go through `to_row`; `plain` prints one id
/// per line via `id_of`; the structured formats serialize `data` as is.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_of: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Plain => data.iter().map(id_of).collect::<Vec<_>>().join("\n"),
        structured => serialize(structured, data),
    }
}

/// Render one record; `detail` supplies the human-readable table form.
pub fn render_single<T: Serialize>(
    format: OutputFormat,
    data: &T,
    detail: impl Fn(&T) -> String,
    id_of: impl Fn(&T) -> String,
) -> String {
    match format {
        OutputFormat::Table => detail(data),
        OutputFormat::Plain => id_of(data),
        structured => serialize(structured, data),
    }
}

/// Write to stdout unless `--quiet` or there is nothing to say.
pub fn print_output(output: &str, quiet: bool) {
    if !quiet && !output.is_empty() {
        let _ = writeln!(io::stdout().lock(), "{output}");
    }
}

fn serialize<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> String {
    let rendered = match format {
        OutputFormat::JsonCompact => serde_json::to_string(data).ok(),
        OutputFormat::Yaml => serde_yaml::to_string(data).ok(),
        _ => serde_json::to_string_pretty(data).ok(),
    };
    rendered.expect("product and config types always serialize")
}
