//! Record preprocessing: box-office bands, genre labels and corpus summaries

use crate::data::{BoxOfficeBucket, FilmRecord};
use crate::error::{AnalysisError, Result};
use crate::stats::degree::{histogram_with_bin_count, Histogram};
use std::collections::BTreeSet;

/// Revenue thresholds separating the five box-office bands
#[derive(Debug, Clone, PartialEq)]
pub struct BoxOfficeBands {
    /// Upper (inclusive) bound of each of the four lower bands
    pub thresholds: [f64; 4],
}

impl BoxOfficeBands {
    /// Derive band thresholds from the quintiles of the known revenues
    pub fn from_revenues(revenues: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = revenues.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut thresholds = [0.0; 4];
        for (i, threshold) in thresholds.iter_mut().enumerate() {
            *threshold = quantile(&sorted, (i + 1) as f64 / 5.0);
        }
        Some(Self { thresholds })
    }

    /// Band for a revenue value
    pub fn classify(&self, revenue: f64) -> BoxOfficeBucket {
        let above = self.thresholds.iter().filter(|&&t| revenue > t).count();
        // `above` is at most 4, so the lookup always succeeds
        BoxOfficeBucket::from_index(above).unwrap_or(BoxOfficeBucket::VeryHigh)
    }
}

/// Linearly interpolated quantile of an ascending slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Fill in the box-office band of every record that has revenue but no band
pub fn assign_box_office_buckets(mut records: Vec<FilmRecord>) -> Vec<FilmRecord> {
    let revenues: Vec<f64> = records.iter().filter_map(|r| r.box_office).collect();
    let Some(bands) = BoxOfficeBands::from_revenues(&revenues) else {
        log::debug!("No box office revenue present, leaving bands unset");
        return records;
    };

    log::debug!("Box office band thresholds: {:?}", bands.thresholds);

    for record in records.iter_mut() {
        if record.bucket.is_none() {
            record.bucket = record
                .box_office
                .filter(|v| v.is_finite())
                .map(|v| bands.classify(v));
        }
    }
    records
}

/// Strip whitespace from a genre label ("Science Fiction" becomes "ScienceFiction")
pub fn normalize_genre(genre: &str) -> String {
    genre.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Sorted distinct normalised genres, without the excluded ones
pub fn genre_list<'a, I>(genres: I, excluded: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let excluded: BTreeSet<String> = excluded.iter().map(|g| normalize_genre(g)).collect();
    genres
        .into_iter()
        .map(|g| normalize_genre(g))
        .filter(|g| !g.is_empty() && !excluded.contains(g))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Average number of credited actors per film
pub fn average_cast_size(records: &[FilmRecord]) -> Result<f64> {
    if records.is_empty() {
        return Err(AnalysisError::Data("no film records".to_string()));
    }
    let total: usize = records.iter().map(|r| r.cast.len()).sum();
    Ok(total as f64 / records.len() as f64)
}

/// Histogram of known box-office revenues
pub fn box_office_histogram(records: &[FilmRecord], bins: usize) -> Histogram {
    let revenues: Vec<f64> = records.iter().filter_map(|r| r.box_office).collect();
    histogram_with_bin_count(&revenues, bins)
}
