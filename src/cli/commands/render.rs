//! Render command implementation
//!
//! Parses a single export and writes its records to stdout, either back in
//! the wire format or as JSON lines.

use super::shared::CommandStats;
use crate::cli::args::{RenderArgs, RenderFormat};
use crate::models::Document;
use crate::screening_parser::ScreeningParser;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;

/// Render command runner
pub async fn run_render(args: RenderArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let result = ScreeningParser::new()
        .parse_with_stats(&bytes)
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_document(&mut out, &result.document, args.format)?;
    out.flush().context("Failed to flush output")?;

    info!(
        "Rendered {} records from {}",
        result.document.len(),
        args.file.display()
    );

    Ok(CommandStats {
        files_parsed: 1,
        files_failed: 0,
        parse: result.stats,
        elapsed: start_time.elapsed(),
    })
}

/// Write `document` in the requested format
pub fn write_document<W: Write>(out: &mut W, document: &Document, format: RenderFormat) -> Result<()> {
    match format {
        RenderFormat::Wire => {
            out.write_all(document.to_wire_text().as_bytes())
                .context("Failed to write records")?;
        }
        RenderFormat::Json => {
            for record in document.records() {
                serde_json::to_writer(&mut *out, record).context("Failed to serialise record")?;
                out.write_all(b"\n").context("Failed to write records")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening_parser::parse_str;
    use crate::screening_parser::tests::{OTHER_ROW, VALID_ROW, export_with_rows};

    #[test]
    fn test_wire_output_reparses() {
        let document = parse_str(&export_with_rows(&[VALID_ROW, OTHER_ROW])).unwrap();
        let mut out = Vec::new();
        write_document(&mut out, &document, RenderFormat::Wire).unwrap();

        let reparsed = parse_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_json_lines_output() {
        let document = parse_str(&export_with_rows(&[VALID_ROW, OTHER_ROW])).unwrap();
        let mut out = Vec::new();
        write_document(&mut out, &document, RenderFormat::Json).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["primary_key"], "1001");
        assert_eq!(first["date_of_birth"], "2012-04-01");
        assert_eq!(first["monocular"], "BINOCULAR");
        assert_eq!(first["od"]["axis"], 180.0);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["screening_result"], "REFER_OR_TRY_AGAIN");
    }

    #[test]
    fn test_empty_document_json_is_empty() {
        let mut out = Vec::new();
        write_document(&mut out, &Document::default(), RenderFormat::Json).unwrap();
        assert!(out.is_empty());
    }
}
