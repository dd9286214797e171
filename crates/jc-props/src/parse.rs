//! Whitespace-delimited table parsing.
//!
//! Format: one row per line, three numeric columns separated by whitespace.
//! Blank lines and lines starting with `#` are ignored.

use crate::error::{PropsError, PropsResult};
use crate::specific_heat::{SpecificHeatRow, SpecificHeatTable};
use crate::table::{GasRow, PropertyTable};
use std::io::Read;
use std::path::Path;

/// Parse a (temperature, enthalpy, relative pressure) table.
pub fn load_table(source: &str) -> PropsResult<PropertyTable> {
    let rows = parse_rows(source)?
        .into_iter()
        .map(|[t, h, pr]| GasRow::new(t, h, pr))
        .collect();
    let table = PropertyTable::new(rows)?;
    tracing::debug!(rows = table.len(), "loaded gas property table");
    Ok(table)
}

/// Parse a (temperature, cp, cv) table.
pub fn load_specific_heat_table(source: &str) -> PropsResult<SpecificHeatTable> {
    let rows = parse_rows(source)?
        .into_iter()
        .map(|[t, cp, cv]| SpecificHeatRow::new(t, cp, cv))
        .collect();
    let table = SpecificHeatTable::new(rows)?;
    tracing::debug!(rows = table.len(), "loaded specific heat table");
    Ok(table)
}

pub fn read_table<R: Read>(mut reader: R) -> PropsResult<PropertyTable> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    load_table(&source)
}

pub fn read_specific_heat_table<R: Read>(mut reader: R) -> PropsResult<SpecificHeatTable> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    load_specific_heat_table(&source)
}

pub fn load_table_from_path(path: &Path) -> PropsResult<PropertyTable> {
    let source = std::fs::read_to_string(path)?;
    load_table(&source)
}

pub fn load_specific_heat_table_from_path(path: &Path) -> PropsResult<SpecificHeatTable> {
    let source = std::fs::read_to_string(path)?;
    load_specific_heat_table(&source)
}

fn parse_rows(source: &str) -> PropsResult<Vec<[f64; 3]>> {
    let mut rows = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(PropsError::Parse {
                line: line_no,
                message: format!("expected 3 columns, found {}", fields.len()),
            });
        }

        let mut row = [0.0; 3];
        for (slot, field) in row.iter_mut().zip(&fields) {
            let value: f64 = field.parse().map_err(|_| PropsError::Parse {
                line: line_no,
                message: format!("'{field}' is not a number"),
            })?;
            if !value.is_finite() {
                return Err(PropsError::Parse {
                    line: line_no,
                    message: format!("'{field}' is not finite"),
                });
            }
            *slot = value;
        }
        rows.push(row);
    }

    Ok(rows)
}
