//! CSV boundary: uploaded pressure/Rs tables in, computed series out.
//!
//! Uploaded tables carry a header row with caller-chosen names; only the
//! first two columns are read (pressure, then Rs) and extra columns are
//! ignored. Exported files always use the `Quantity` labels as headers.

use std::io;

use log::info;

use crate::error::AppError;
use crate::pvt::series::{CorrelationResult, Quantity, RsTable};

fn parse_cell(value: Option<&str>, row: usize, column: &str) -> Result<f64, AppError> {
    let raw = value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::malformed(format!("row {row}: missing value in column '{column}'")))?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            AppError::malformed(format!(
                "row {row}: '{raw}' in column '{column}' is not a number"
            ))
        })
}

/// Headers and the first two numeric columns of a CSV document.
fn read_two_columns<R: io::Read>(reader: R) -> Result<([String; 2], Vec<f64>, Vec<f64>), AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AppError::malformed(e.to_string()))?
        .clone();
    if headers.len() < 2 {
        return Err(AppError::malformed(format!(
            "expected two columns (pressure, Rs), found {}",
            headers.len()
        )));
    }
    let names = [headers[0].to_string(), headers[1].to_string()];

    let mut first = Vec::new();
    let mut second = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| AppError::malformed(e.to_string()))?;
        // data rows start on line 2
        let row = i + 2;
        first.push(parse_cell(record.get(0), row, &names[0])?);
        second.push(parse_cell(record.get(1), row, &names[1])?);
    }
    Ok((names, first, second))
}

/// Read an uploaded (pressure, Rs) table.
pub fn read_rs_table<R: io::Read>(reader: R) -> Result<RsTable, AppError> {
    let ([p_name, rs_name], pressure, rs) = read_two_columns(reader)?;
    info!(
        "Loaded {} rows from table ('{p_name}', '{rs_name}')",
        pressure.len()
    );
    RsTable::new(pressure, rs)
}

/// Read back a series written by [`write_result_csv`].
pub fn read_result_csv<R: io::Read>(
    reader: R,
    correlation: impl Into<String>,
) -> Result<CorrelationResult, AppError> {
    let ([axis_name, value_name], axis_values, values) = read_two_columns(reader)?;
    let lookup = |name: &str| {
        Quantity::from_label(name)
            .ok_or_else(|| AppError::malformed(format!("unknown column '{name}'")))
    };
    Ok(CorrelationResult::new(
        correlation,
        lookup(&axis_name)?,
        lookup(&value_name)?,
        axis_values,
        values,
    ))
}

/// Write a series as a two-column CSV, e.g. `Pressure(psia),Bo(rb/STB)`.
///
/// Values use Rust's shortest round-trip float formatting, so reading the
/// file back yields bit-identical numbers.
pub fn write_result_csv<W: io::Write>(result: &CorrelationResult, writer: W) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record([result.axis.label(), result.property.label()])
        .map_err(|source| AppError::Export { source })?;
    for (x, y) in result.points() {
        csv_writer
            .write_record([x.to_string(), y.to_string()])
            .map_err(|source| AppError::Export { source })?;
    }
    csv_writer
        .flush()
        .map_err(|e| AppError::Export { source: e.into() })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_two_columns_and_ignores_extra() {
        let data = "P (psia), Rs (scf/STB), note\n500, 120.5, a\n1000,260,b\n";
        let table = read_rs_table(data.as_bytes()).unwrap();
        assert_eq!(table.pressure(), &[500.0, 1000.0]);
        assert_eq!(table.rs(), &[120.5, 260.0]);
    }

    #[test]
    fn single_column_is_malformed() {
        let err = read_rs_table("pressure\n500\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("expected two columns"));
    }

    #[test]
    fn non_numeric_cell_reports_row() {
        let err = read_rs_table("p,rs\n500,100\n600,abc\n".as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 3") && msg.contains("abc"), "{msg}");

        let err = read_rs_table("p,rs\n500,100\n600,-20\n".as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 3") && msg.contains("negative"), "{msg}");

        let err = read_rs_table("p,rs\n0,0\n600,20\n".as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 2") && msg.contains("not positive"), "{msg}");
    }

    #[test]
    fn short_row_is_malformed() {
        let err = read_rs_table("p,rs\n500,100\n600\n".as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::MalformedUpload { .. }));
    }

    #[test]
    fn header_only_table_is_malformed() {
        let err = read_rs_table("p,rs\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn export_uses_quantity_labels() {
        let result = CorrelationResult::new(
            "Standing",
            Quantity::Pressure,
            Quantity::SolutionGor,
            vec![500.0, 501.0],
            vec![100.25, 100.5],
        );
        let mut buf = Vec::new();
        write_result_csv(&result, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Pressure(psia),Rs(scf/STB)\n500,100.25\n501,100.5\n");
    }

    #[test]
    fn unknown_export_header_is_rejected() {
        let err = read_result_csv("Depth(ft),Bo(rb/STB)\n1,1.2\n".as_bytes(), "x").unwrap_err();
        assert!(err.to_string().contains("Depth(ft)"));
    }
}
