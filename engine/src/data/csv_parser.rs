use csv::{Position, ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::AuditSettings;
use crate::error::EngineError;
use crate::models::CustomerRecord;

// Brazilian date handling for the export's "Data Cadastro" column
pub mod brazilian_format {
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;

    // Parses "dd/mm/yyyy"
    pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(date_str.trim(), "%d/%m/%Y")
            .map_err(|e| anyhow!("Failed to parse date '{}': {}", date_str, e))
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::Datelike;

        #[test]
        fn test_parse_date_valid() {
            let date = parse_date("30/12/2024").unwrap();
            assert_eq!(date.year(), 2024);
            assert_eq!(date.month(), 12);
            assert_eq!(date.day(), 30);
        }

        #[test]
        fn test_parse_date_invalid_day() {
            assert!(parse_date("32/12/2024").is_err());
        }

        #[test]
        fn test_parse_date_iso_format_rejected() {
            assert!(parse_date("2024-12-30").is_err());
        }

        #[test]
        fn test_format_date() {
            let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
            assert_eq!(format_date(date), "07/03/2025");
        }
    }
}

const NAME: &str = "Nome";
const DOCUMENT: &str = "Documento";
const EMAIL: &str = "Email";
const PHONE: &str = "Telefone";
const REGISTERED_ON: &str = "Data Cadastro";

/// Where each column lives in a record.
struct Columns {
    name: usize,
    document: usize,
    email: Option<usize>,
    phone: Option<usize>,
    registered_on: Option<usize>,
}

impl Columns {
    // Headerless exports follow the column order of the header above
    fn positional() -> Self {
        Columns {
            name: 0,
            document: 1,
            email: Some(2),
            phone: Some(3),
            registered_on: Some(4),
        }
    }

    fn from_headers(headers: &StringRecord) -> Result<Self, EngineError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| {
                EngineError::CsvDataFormatError(format!("Missing '{}' column in header at line 1", name))
            })
        };

        Ok(Columns {
            name: required(NAME)?,
            document: required(DOCUMENT)?,
            email: find(EMAIL),
            phone: find(PHONE),
            registered_on: find(REGISTERED_ON),
        })
    }
}

pub struct RegistryCsvParser;

impl RegistryCsvParser {
    // CSV Header: Nome;Documento;Email;Telefone;Data Cadastro
    // Example Row: Geradores Silva Ltda;11.222.333/0001-81;contato@silva.com.br;(11) 3333-4444;15/01/2024
    pub fn load_records(
        file_path: impl AsRef<Path>,
        settings: &AuditSettings,
    ) -> Result<Vec<CustomerRecord>, EngineError> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path).map_err(|e| {
            let message = format!("Failed to open CSV file '{}': {}", file_path.display(), e);
            EngineError::IoError {
                source: std::io::Error::new(e.kind(), message),
            }
        })?;
        let records = Self::parse_records(BufReader::new(file), settings)?;
        tracing::info!(path = %file_path.display(), count = records.len(), "Loaded registration records");
        Ok(records)
    }

    pub fn parse_records<R: Read>(
        mut reader: R,
        settings: &AuditSettings,
    ) -> Result<Vec<CustomerRecord>, EngineError> {
        settings.validate()?;
        // Kept whole so record offsets can be mapped back to line numbers
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;

        let mut rdr = ReaderBuilder::new()
            .delimiter(settings.delimiter_byte())
            .has_headers(settings.has_headers)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input.as_slice());

        let (columns, first_line) = if settings.has_headers {
            (Columns::from_headers(rdr.headers()?)?, 2)
        } else {
            (Columns::positional(), 1)
        };

        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let fallback = idx + first_line;
            let record = result.map_err(|e| {
                let line = e.position().map_or(fallback, |p| Self::line_of(&input, p));
                EngineError::CsvDataFormatError(format!("Error reading CSV record at line {}: {}", line, e))
            })?;
            let line = record.position().map_or(fallback, |p| Self::line_of(&input, p));

            if record.iter().all(|field| field.is_empty()) {
                tracing::debug!(line, "Skipping blank CSV line");
                continue;
            }

            let name = Self::required_field(&record, columns.name, NAME, line)?;
            let document = Self::required_field(&record, columns.document, DOCUMENT, line)?;
            let email = Self::optional_field(&record, columns.email);
            let phone = Self::optional_field(&record, columns.phone);
            let registered_on = Self::optional_field(&record, columns.registered_on)
                .map(|date| {
                    brazilian_format::parse_date(&date).map_err(|e| {
                        EngineError::CsvDataFormatError(format!(
                            "Error parsing '{}' at line {}: {}",
                            REGISTERED_ON, line, e
                        ))
                    })
                })
                .transpose()?;

            records.push(CustomerRecord {
                line,
                name,
                document,
                email,
                phone,
                registered_on,
            });
        }
        Ok(records)
    }

    // The reader stamps a record's position before skipping blank lines, so
    // step over any line breaks at that offset to land on the record itself
    fn line_of(input: &[u8], pos: &Position) -> usize {
        let start = (pos.byte() as usize).min(input.len());
        let skipped = input[start..]
            .iter()
            .take_while(|b| matches!(b, b'\r' | b'\n'))
            .count();
        input[..start + skipped].iter().filter(|b| **b == b'\n').count() + 1
    }

    fn required_field(
        record: &StringRecord,
        pos: usize,
        column: &str,
        line: usize,
    ) -> Result<String, EngineError> {
        record.get(pos).map(str::to_string).ok_or_else(|| {
            EngineError::CsvDataFormatError(format!("Missing '{}' field in CSV record at line {}", column, line))
        })
    }

    // Absent and empty cells are both treated as "not informed"
    fn optional_field(record: &StringRecord, pos: Option<usize>) -> Option<String> {
        pos.and_then(|p| record.get(p))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}
