//
//  bitbucket-lite
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting Module
//!
//! Renders command results either as human-readable tables or as pretty
//! JSON for scripting.
//!
//! | Format | Lists | Single records |
//! |--------|-------|----------------|
//! | `Table` | One `comfy-table` table, one row per item | `key: value` fields |
//! | `Json` | A JSON array of the full records | The full record |
//!
//! JSON output serializes every attribute the API returned, including the
//! ones without a typed field.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_lite::output::{OutputFormat, OutputWriter, TableRow};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Item {
//!     name: String,
//! }
//!
//! impl TableRow for Item {
//!     fn headers() -> &'static [&'static str] {
//!         &["NAME"]
//!     }
//!
//!     fn row(&self, _color: bool) -> Vec<String> {
//!         vec![self.name.clone()]
//!     }
//! }
//!
//! let output = OutputWriter::new(OutputFormat::Table);
//! output.write_list(&[Item { name: "main".into() }])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod table;

pub use table::*;

use serde::Serialize;

use crate::api::resource::Resource;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables (default).
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// `Json` when `json` is set, `Table` otherwise.
    pub fn from_json_flag(json: bool) -> Self {
        Self::new(if json { OutputFormat::Json } else { OutputFormat::Table })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single record.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of records as one table or one JSON array.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
            OutputFormat::Table if values.is_empty() => self.write_info("No results"),
            OutputFormat::Table => render_rows(values, self.color).print(),
        }
        Ok(())
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }
}

/// Detail view of a single record.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// One line of a list table.
pub trait TableRow {
    /// Column headers, in row order.
    fn headers() -> &'static [&'static str];

    /// Cell values for this item; `color` enables `console` styling.
    fn row(&self, color: bool) -> Vec<String>;
}

impl<R: TableRow> TableRow for Resource<'_, R> {
    fn headers() -> &'static [&'static str] {
        R::headers()
    }

    fn row(&self, color: bool) -> Vec<String> {
        self.record().row(color)
    }
}

impl<R: TableOutput> TableOutput for Resource<'_, R> {
    fn print_table(&self, color: bool) {
        self.record().print_table(color)
    }
}

/// Builds the table for a list of items.
pub fn render_rows<T: TableRow>(values: &[T], color: bool) -> TableBuilder {
    TableBuilder::new()
        .color(color)
        .headers(T::headers().iter().copied())
        .rows(values.iter().map(|value| value.row(color)))
}

/// Prints a bold title underlined with dashes.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, u32);

    impl TableRow for Row {
        fn headers() -> &'static [&'static str] {
            &["NAME", "COUNT"]
        }

        fn row(&self, _color: bool) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
        assert_eq!(OutputWriter::from_json_flag(true).format(), OutputFormat::Json);
    }

    #[test]
    fn test_render_rows() {
        let rendered = render_rows(&[Row("main", 3), Row("feature-x", 12)], false)
            .build()
            .to_string();

        assert!(rendered.contains("NAME"));
        assert!(rendered.contains("COUNT"));
        assert!(rendered.contains("feature-x"));
        assert!(rendered.find("main").unwrap() < rendered.find("feature-x").unwrap());
    }
}
