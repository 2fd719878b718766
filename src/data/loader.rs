//! Tabular film data loading (CSV or Parquet) for the command-line driver

use crate::data::FilmRecord;
use crate::error::{AnalysisError, Result};
use polars::prelude::*;
use std::path::Path;

/// Load film records from a CSV or Parquet file
///
/// Expected columns: `title`, `actors`, `genres`, `box_office` and optionally
/// `link`. `actors` and `genres` hold list literals such as `['A', 'B']`.
pub fn load_film_records(path: &str) -> Result<Vec<FilmRecord>> {
    log::info!("Reading film data: {}", path);

    if !Path::new(path).exists() {
        return Err(AnalysisError::Data(format!("File not found: {}", path)));
    }

    let df = if path.ends_with(".parquet") {
        LazyFrame::scan_parquet(path, Default::default())?.collect()?
    } else {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .finish()?
            .collect()?
    };

    log::info!("File schema: {:?}", df.schema());
    log::info!("Loaded {} film rows", df.height());

    records_from_frame(&df)
}

/// Convert a data frame with the expected columns into film records
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<FilmRecord>> {
    let titles = df.column("title")?.str()?;
    let actors = df.column("actors")?.str()?;
    let genres = df.column("genres")?.str()?;
    let links = match df.column("link") {
        Ok(column) => Some(column.str()?),
        Err(_) => None,
    };
    let box_office = df.column("box_office")?.cast(&DataType::Float64)?;
    let box_office = box_office.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let title = titles.get(i).unwrap_or_default().to_string();
        let cast = match actors.get(i) {
            Some(raw) => parse_list_literal(raw)
                .map_err(|e| AnalysisError::Data(format!("row {}: actors: {}", i, e)))?,
            None => Vec::new(),
        };
        let film_genres = match genres.get(i) {
            Some(raw) => parse_list_literal(raw)
                .map_err(|e| AnalysisError::Data(format!("row {}: genres: {}", i, e)))?,
            None => Vec::new(),
        };

        records.push(FilmRecord {
            title,
            link: links.and_then(|l| l.get(i)).map(|s| s.to_string()),
            cast,
            genres: film_genres,
            box_office: box_office.get(i),
            bucket: None,
        });
    }

    Ok(records)
}

/// Parse a list literal of quoted strings, e.g. `['Tom Hanks', "Conan O'Brien"]`
pub fn parse_list_literal(raw: &str) -> std::result::Result<Vec<String>, String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("not a list literal: {}", raw))?;

    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();
    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace() || *c == ',') {
            chars.next();
        }
        let Some(quote) = chars.next() else {
            break;
        };
        if quote != '\'' && quote != '"' {
            return Err(format!("expected a quoted item in {}", raw));
        }

        let mut item = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        item.push(escaped);
                    }
                }
                c if c == quote => {
                    closed = true;
                    break;
                }
                c => item.push(c),
            }
        }
        if !closed {
            return Err(format!("unterminated item in {}", raw));
        }
        items.push(item);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_quotes() {
        let items = parse_list_literal(r#"['Tom Hanks', "Conan O'Brien", 'Tim Allen']"#).unwrap();
        assert_eq!(items, vec!["Tom Hanks", "Conan O'Brien", "Tim Allen"]);
    }

    #[test]
    fn parses_empty_list() {
        assert!(parse_list_literal("[]").unwrap().is_empty());
        assert!(parse_list_literal("  [ ] ").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_lists() {
        assert!(parse_list_literal("Tom Hanks").is_err());
        assert!(parse_list_literal("['Tom Hanks").is_err());
        assert!(parse_list_literal("[Tom]").is_err());
    }

    #[test]
    fn frame_rows_become_records() {
        let df = df!(
            "title" => ["Toy Story", "Big"],
            "actors" => ["['Tom Hanks', 'Tim Allen']", "['Tom Hanks']"],
            "genres" => ["['Animation', 'Comedy']", "['Comedy']"],
            "box_office" => [Some(373.0), None],
        )
        .unwrap();

        let records = records_from_frame(&df).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cast, vec!["Tom Hanks", "Tim Allen"]);
        assert_eq!(records[1].genres, vec!["Comedy"]);
        assert_eq!(records[0].box_office, Some(373.0));
        assert_eq!(records[1].box_office, None);
        assert_eq!(records[0].link, None);
    }
}
