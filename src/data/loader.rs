//! CSV Data Loader Module
//! Fetches the tier CSV from disk or over HTTP and parses it with Polars.

use crate::data::Row;
use polars::prelude::*;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Where the CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Treat `http://` and `https://` strings as URLs, anything else as a path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Loads CSV rows with every column kept as a string.
pub struct DataLoader;

impl DataLoader {
    /// Fetch and parse `source` into rows, in file order.
    pub fn load_rows(source: &DataSource) -> Result<Vec<Row>, LoaderError> {
        let bytes = Self::fetch(source)?;
        let df = Self::parse_csv(bytes)?;
        let rows = Self::dataframe_to_rows(&df)?;
        info!(%source, rows = rows.len(), "loaded CSV");
        Ok(rows)
    }

    fn fetch(source: &DataSource) -> Result<Vec<u8>, LoaderError> {
        match source {
            DataSource::File(path) => std::fs::read(path).map_err(|source| LoaderError::Io {
                path: path.clone(),
                source,
            }),
            DataSource::Url(url) => {
                debug!(%url, "fetching CSV");
                let to_http = |source| LoaderError::Http {
                    url: url.clone(),
                    source,
                };
                let response = reqwest::blocking::get(url)
                    .and_then(|r| r.error_for_status())
                    .map_err(to_http)?;
                let body = response.bytes().map_err(to_http)?;
                Ok(body.to_vec())
            }
        }
    }

    /// Parse CSV bytes with a header row. Schema inference is off so every
    /// column arrives as a string. Fields past the header width are dropped.
    pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Ok(df)
    }

    /// Convert a DataFrame into one mapping per row. Null cells are omitted.
    pub fn dataframe_to_rows(df: &DataFrame) -> Result<Vec<Row>, LoaderError> {
        let mut rows = vec![Row::new(); df.height()];

        for column in df.get_columns() {
            let name = column.name().to_string();
            let series = column.as_materialized_series().cast(&DataType::String)?;
            let values = series.str()?;

            for (row, value) in rows.iter_mut().zip(values.into_iter()) {
                if let Some(value) = value {
                    row.insert(name.clone(), value.to_string());
                }
            }
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "Channel_Size_Tier,Channel_Percentage,Capacity_Percentage,Num_Channels,Num_Unique_Nodes
My Way,61.5,4.2,30123,9001
Highway,33.0,41.8,16100,
Freeway,5.5,54.0,2700,1200
";

    #[test]
    fn test_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.com/ChannelES.csv"),
            DataSource::Url("https://example.com/ChannelES.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("data/ChannelES.csv"),
            DataSource::File(PathBuf::from("data/ChannelES.csv"))
        );
    }

    #[test]
    fn test_load_rows_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let rows = DataLoader::load_rows(&source).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["Channel_Size_Tier"], "My Way");
        assert_eq!(rows[0]["Num_Channels"], "30123");
        assert_eq!(rows[2]["Capacity_Percentage"], "54.0");
        assert!(!rows[1].contains_key("Num_Unique_Nodes"));
    }

    #[test]
    fn test_numbers_stay_strings() {
        let df = DataLoader::parse_csv(CSV.as_bytes().to_vec()).unwrap();

        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
    }

    #[test]
    fn test_overlong_row_is_truncated() {
        let csv = "Channel_Size_Tier,Channel_Percentage\nMy Way,50,extra\nHighway,30\n";
        let df = DataLoader::parse_csv(csv.as_bytes().to_vec()).unwrap();
        let rows = DataLoader::dataframe_to_rows(&df).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Channel_Size_Tier"], "My Way");
        assert_eq!(rows[0]["Channel_Percentage"], "50");
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1]["Channel_Percentage"], "30");
    }

    #[test]
    fn test_missing_file_is_error() {
        let source = DataSource::File(PathBuf::from("/nonexistent/ChannelES.csv"));
        let err = DataLoader::load_rows(&source).unwrap_err();

        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(err.to_string().contains("ChannelES.csv"));
    }
}
