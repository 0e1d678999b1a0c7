//! Output targets and plain-text table formatting shared by the handlers.

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// How `browse` presents the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseOutput {
    Tui,
    Report(OutputFormat),
}

/// Interactive terminals get the TUI unless a report format was requested.
#[must_use]
pub fn detect_browse_output(
    requested: Option<OutputFormat>,
    target: &OutputTarget,
) -> BrowseOutput {
    match requested {
        Some(format) => BrowseOutput::Report(format),
        None if target.is_terminal() => BrowseOutput::Tui,
        None => BrowseOutput::Report(OutputFormat::Table),
    }
}

/// Whether colored output is allowed (also respects `NO_COLOR`).
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Truncate to a display width, ending with `...` when shortened.
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let (budget, ellipsis) = if max > 3 { (max - 3, "...") } else { (max, "") };
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str(ellipsis);
    out
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Render rows as aligned columns under upper-cased headers.
///
/// Each column is as wide as its widest cell, capped at `max_width`.
#[must_use]
pub fn format_text_table(headers: &[&str], rows: &[Vec<String>], max_width: usize) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
                .min(max_width)
        })
        .collect();

    let render_line = |cells: Vec<String>| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(&truncate(cell, *w), *w))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut out = render_line(headers.iter().map(|h| h.to_uppercase()).collect());
    for row in rows {
        out.push_str(&render_line(row.clone()));
    }
    out
}
