//! Upload format detection and tabular parsing.
//!
//! Every format reads into the same [`Table`], so the row loop does not care
//! where the data came from.

use std::io::Cursor;

use calamine::{Data, Reader};

use crate::errors::AppError;

/// Tabular upload formats we can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Tsv,
    /// Excel (xlsx, xlsm, xlsb, xls) or OpenDocument (ods); first sheet only.
    Spreadsheet,
}

impl UploadFormat {
    /// Pick a format from the file name extension, falling back to the content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, AppError> {
        let by_extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| Self::from_extension(ext));

        by_extension
            .or_else(|| content_type.and_then(Self::from_content_type))
            .ok_or_else(|| {
                AppError::UnsupportedFormat(format!(
                    "Unsupported file format for {}; upload a CSV or Excel file",
                    file_name.unwrap_or("upload")
                ))
            })
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(UploadFormat::Csv),
            "tsv" | "tab" => Some(UploadFormat::Tsv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(UploadFormat::Spreadsheet),
            _ => None,
        }
    }

    fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "text/csv" | "application/csv" => Some(UploadFormat::Csv),
            "text/tab-separated-values" => Some(UploadFormat::Tsv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel"
            | "application/vnd.ms-excel.sheet.macroenabled.12"
            | "application/vnd.oasis.opendocument.spreadsheet" => Some(UploadFormat::Spreadsheet),
            _ => None,
        }
    }

    /// Parse the raw upload into a table.
    pub fn parse(&self, bytes: &[u8]) -> Result<Table, AppError> {
        match self {
            UploadFormat::Csv => parse_delimited(bytes, b','),
            UploadFormat::Tsv => parse_delimited(bytes, b'\t'),
            UploadFormat::Spreadsheet => parse_spreadsheet(bytes),
        }
    }
}

/// Header row plus data rows, all cells as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of the column whose trimmed header matches `name` case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    }
}

fn parse_delimited(bytes: &[u8], delimiter: u8) -> Result<Table, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

fn parse_spreadsheet(bytes: &[u8]) -> Result<Table, AppError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Parse("Spreadsheet contains no worksheets".to_string()))??;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let headers = rows.next().unwrap_or_default();

    Ok(Table {
        headers,
        rows: rows.collect(),
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
