//
//  bitbucket-lite
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Formatting
//!
//! Helpers around `comfy-table` for list output, plus small cell
//! formatters shared by the commands.
//!
//! ```rust
//! use bitbucket_lite::output::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .color(false)
//!     .headers(vec!["NAME", "STATE"])
//!     .row(vec!["#42", "SUCCESSFUL"])
//!     .build();
//! assert!(table.to_string().contains("SUCCESSFUL"));
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates a table with the default preset and dynamic column widths.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent builder over a `comfy-table` [`Table`].
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the header row, in cyan when color is enabled.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self = self.row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a state or result name by what it means.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "open" | "in_progress" | "running" | "inprogress" => style(status).green().to_string(),
        "merged" | "completed" | "successful" => style(status).blue().to_string(),
        "declined" | "failed" | "error" | "stopped" => style(status).red().to_string(),
        "pending" | "paused" | "superseded" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

/// Shortens `s` to at most `max_len` characters, ending with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let head: String = s.chars().take(max_len - 3).collect();
    format!("{head}...")
}

/// `-` for missing values.
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer message", 10), "a much ...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_status_without_color() {
        assert_eq!(format_status("FAILED", false), "FAILED");
        assert_eq!(format_status("OPEN", false), "OPEN");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("Rust")), "Rust");
    }

    #[test]
    fn test_builder_rows() {
        let table = TableBuilder::new()
            .color(false)
            .headers(vec!["A", "B"])
            .rows(vec![vec!["1", "2"], vec!["3", "4"]])
            .build();
        assert_eq!(table.row_iter().count(), 2);
    }
}
