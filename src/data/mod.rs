//! Film records and their categorical attributes

pub mod loader;
pub mod preprocessing;

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of five ordered revenue bands, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoxOfficeBucket {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl BoxOfficeBucket {
    /// All bands in ascending order
    pub const ALL: [BoxOfficeBucket; 5] = [
        BoxOfficeBucket::VeryLow,
        BoxOfficeBucket::Low,
        BoxOfficeBucket::Medium,
        BoxOfficeBucket::High,
        BoxOfficeBucket::VeryHigh,
    ];

    /// Position of the band, 0 for the lowest
    pub fn index(self) -> usize {
        self as usize
    }

    /// Band for a position, if it is in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            BoxOfficeBucket::VeryLow => "very low box office",
            BoxOfficeBucket::Low => "low box office",
            BoxOfficeBucket::Medium => "medium box office",
            BoxOfficeBucket::High => "high box office",
            BoxOfficeBucket::VeryHigh => "very high box office",
        }
    }
}

impl fmt::Display for BoxOfficeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BoxOfficeBucket {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|bucket| bucket.label() == wanted)
            .ok_or_else(|| AnalysisError::InvalidCategory(format!("unknown box office band '{}'", s)))
    }
}

/// A single film as handed over by the data-loading layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmRecord {
    /// Display title
    pub title: String,

    /// Stable link key, preferred over the title as identifier when present
    pub link: Option<String>,

    /// Credited actors in billing order
    pub cast: Vec<String>,

    /// Genre labels
    pub genres: Vec<String>,

    /// Box-office revenue in USD, `None` when unknown
    pub box_office: Option<f64>,

    /// Revenue band; filled by `preprocessing::assign_box_office_buckets` when absent
    pub bucket: Option<BoxOfficeBucket>,
}

impl FilmRecord {
    /// Create a record with a title and cast, leaving the remaining fields empty
    pub fn new<S: Into<String>>(title: S, cast: Vec<String>) -> Self {
        Self {
            title: title.into(),
            cast,
            ..Self::default()
        }
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    pub fn with_box_office(mut self, box_office: Option<f64>) -> Self {
        self.box_office = box_office;
        self
    }

    /// Identifier of the film: the link key if present, otherwise the title
    pub fn identifier(&self) -> Result<&str> {
        let id = match self.link.as_deref() {
            Some(link) if !link.trim().is_empty() => link,
            _ => self.title.as_str(),
        };
        if id.trim().is_empty() {
            return Err(AnalysisError::Data(
                "film record has neither a link nor a title".to_string(),
            ));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_labels_parse_back() {
        for bucket in BoxOfficeBucket::ALL {
            assert_eq!(bucket.label().parse::<BoxOfficeBucket>().unwrap(), bucket);
        }
        assert_eq!(
            " High Box Office ".parse::<BoxOfficeBucket>().unwrap(),
            BoxOfficeBucket::High
        );
    }

    #[test]
    fn unknown_bucket_is_invalid_category() {
        let err = "enormous box office".parse::<BoxOfficeBucket>().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidCategory(_)));
    }

    #[test]
    fn identifier_prefers_link() {
        let mut record = FilmRecord::new("Heat", vec![]);
        assert_eq!(record.identifier().unwrap(), "Heat");
        record.link = Some("/wiki/Heat_(1995_film)".to_string());
        assert_eq!(record.identifier().unwrap(), "/wiki/Heat_(1995_film)");
    }

    #[test]
    fn missing_identifier_is_data_error() {
        let record = FilmRecord::new("  ", vec!["x".to_string()]);
        assert!(matches!(record.identifier(), Err(AnalysisError::Data(_))));
    }
}
