use std::io::Write;
use std::process::{Command, Stdio};

use serde::Serialize;
use thiserror::Error;

use crate::data::filter::FilteredView;
use crate::data::loader::{COL_ELECTRIC_RANGE, COL_EXPECTED_PRICE, COL_MAKE, COL_MODEL_YEAR};

const COL_PRICE_PER_MILE: &str = "Price per Mile";

/// The binary used to turn the HTML table into a PDF byte stream.
const PDF_RENDERER: &str = "wkhtmltopdf";

/// Failure to serialize or save the filtered view.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF renderer unavailable (is `{PDF_RENDERER}` installed and on PATH?): {0}")]
    RendererUnavailable(std::io::Error),
    #[error("PDF renderer failed: {0}")]
    RendererFailed(String),
    #[error("serializing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// One exported row; field order defines the column order.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Model Year")]
    model_year: i64,
    #[serde(rename = "Make")]
    make: &'a str,
    #[serde(rename = "Electric Range")]
    electric_range: f64,
    #[serde(rename = "Expected Price ($1k)")]
    expected_price: f64,
    #[serde(rename = "Price per Mile")]
    price_per_mile: f64,
}

/// Serialize the filtered view to CSV bytes: header row, no index column,
/// derived price-per-mile as the last column.
pub fn to_csv(view: &FilteredView) -> Result<Vec<u8>, ExportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    if view.rows.is_empty() {
        // serialize() emits the header lazily; keep it for empty views too
        wtr.write_record([
            COL_MODEL_YEAR,
            COL_MAKE,
            COL_ELECTRIC_RANGE,
            COL_EXPECTED_PRICE,
            COL_PRICE_PER_MILE,
        ])?;
    }

    for row in &view.rows {
        wtr.serialize(ExportRow {
            model_year: row.record.model_year,
            make: &row.record.make,
            electric_range: row.record.electric_range,
            expected_price: row.record.expected_price,
            price_per_mile: row.price_per_mile,
        })?;
    }

    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| ExportError::Io(std::io::Error::other(e.to_string())))
}

/// Trim trailing zeros so whole numbers export as "322" rather than "322.0".
fn format_number(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// HTML / PDF
// ---------------------------------------------------------------------------

/// Render the filtered view as a minimal standalone HTML document.
pub fn to_html(view: &FilteredView) -> String {
    let mut html = String::with_capacity(256 + view.len() * 96);
    html.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>EV Explorer – Filtered Data</title>\n\
         <style>table{border-collapse:collapse}td,th{border:1px solid #999;padding:4px 8px}</style>\n\
         </head>\n<body>\n<h1>EV Explorer – Filtered Data</h1>\n<table>\n<thead><tr>",
    );
    for col in [
        COL_MODEL_YEAR,
        COL_MAKE,
        COL_ELECTRIC_RANGE,
        COL_EXPECTED_PRICE,
        COL_PRICE_PER_MILE,
    ] {
        html.push_str("<th>");
        html.push_str(&escape_html(col));
        html.push_str("</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &view.rows {
        html.push_str("<tr>");
        push_cell(&mut html, &row.record.model_year.to_string());
        push_cell(&mut html, &row.record.make);
        push_cell(&mut html, &format_number(row.record.electric_range));
        push_cell(&mut html, &format_number(row.record.expected_price));
        push_cell(&mut html, &format!("{:.2}", row.price_per_mile));
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn push_cell(html: &mut String, text: &str) {
    html.push_str("<td>");
    html.push_str(&escape_html(text));
    html.push_str("</td>");
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Render the filtered view to a PDF byte stream by piping the HTML table
/// through the external renderer. A missing binary is a configuration
/// problem surfaced only on this action; it never disturbs CSV export.
pub fn to_pdf(view: &FilteredView) -> Result<Vec<u8>, ExportError> {
    render_pdf(&to_html(view))
}

fn render_pdf(html: &str) -> Result<Vec<u8>, ExportError> {
    let mut child = Command::new(PDF_RENDERER)
        .args(["--quiet", "-", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(ExportError::RendererUnavailable)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(html.as_bytes())?;
        // stdin drops here, closing the pipe so the renderer can finish
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(ExportError::RendererFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::ViewRow;
    use crate::data::model::Record;

    fn view(rows: Vec<(i64, &str, f64, f64)>) -> FilteredView {
        FilteredView {
            rows: rows
                .into_iter()
                .map(|(year, make, range, price)| {
                    let record = Record {
                        model_year: year,
                        make: make.to_string(),
                        electric_range: range,
                        expected_price: price,
                    };
                    let price_per_mile = record.price_per_mile();
                    ViewRow {
                        record,
                        price_per_mile,
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn csv_has_header_and_derived_column() {
        let bytes = to_csv(&view(vec![(2020, "Tesla", 322.0, 80.5)])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Model Year,Make,Electric Range,Expected Price ($1k),Price per Mile"
        );
        assert_eq!(lines.next().unwrap(), "2020,Tesla,322.0,80.5,250.0");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_view_exports_header_only_csv() {
        let bytes = to_csv(&FilteredView::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn html_contains_every_row() {
        let html = to_html(&view(vec![
            (2020, "Tesla", 322.0, 80.0),
            (2019, "Nissan", 150.0, 32.0),
        ]));
        assert!(html.contains("<td>Tesla</td>"));
        assert!(html.contains("<td>Nissan</td>"));
        assert_eq!(html.matches("<tr>").count(), 3); // header + 2 rows
    }

    #[test]
    fn html_escapes_markup_in_make() {
        let html = to_html(&view(vec![(2020, "<script>&", 100.0, 40.0)]));
        assert!(html.contains("&lt;script&gt;&amp;"));
        assert!(!html.contains("<script>"));
    }
}
