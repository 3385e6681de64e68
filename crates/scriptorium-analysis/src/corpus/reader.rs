//! Tab-separated transcription reader.
//!
//! Keeps only the primary transcriber track and drops tokens carrying the
//! uncertainty marker. Malformed rows are counted and skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use scriptorium_core::config::CorpusConfig;
use scriptorium_core::errors::CorpusError;
use scriptorium_core::tracing::metrics;
use scriptorium_core::types::System;
use tracing::{debug, field, info, info_span, warn};

use super::types::{LoadReport, Token};

/// Per-kind cap on individually logged malformed rows.
const MAX_LOGGED_PER_KIND: usize = 5;

/// Resolved positions of the required columns.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    word: usize,
    folio: usize,
    section: usize,
    language: usize,
    placement: usize,
    line_number: usize,
    transcriber: usize,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord, source: &str) -> Result<Self, CorpusError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| clean(h).eq_ignore_ascii_case(column))
                .ok_or(CorpusError::MissingColumn {
                    path: source.to_string(),
                    column,
                })
        };
        Ok(Self {
            word: find("word")?,
            folio: find("folio")?,
            section: find("section")?,
            language: find("language")?,
            placement: find("placement")?,
            line_number: find("line_number")?,
            transcriber: find("transcriber")?,
        })
    }

    fn max_index(&self) -> usize {
        [
            self.word,
            self.folio,
            self.section,
            self.language,
            self.placement,
            self.line_number,
            self.transcriber,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Read a transcription file from disk.
pub fn read_transcription(
    path: &Path,
    config: &CorpusConfig,
) -> Result<(Vec<Token>, LoadReport), CorpusError> {
    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_transcription_from(file, &path.display().to_string(), config)
}

/// Read a transcription from any reader. `source` names it in errors and logs.
pub fn read_transcription_from<R: Read>(
    reader: R,
    source: &str,
    config: &CorpusConfig,
) -> Result<(Vec<Token>, LoadReport), CorpusError> {
    let start = Instant::now();
    let span = info_span!(
        "load_transcription",
        rows_read = field::Empty,
        tokens_retained = field::Empty,
        rows_malformed = field::Empty,
    );
    let _guard = span.enter();
    let primary_track = config.effective_primary_track();
    let marker = config.effective_uncertainty_marker();

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| header_error(e, source))?
        .clone();
    let columns = ColumnMap::resolve(&headers, source)?;
    let min_fields = columns.max_index() + 1;

    let mut tokens = Vec::new();
    let mut report = LoadReport::default();

    for (row_idx, row) in csv_reader.records().enumerate() {
        // Header is line 1.
        let row_no = row_idx + 2;
        report.rows_read += 1;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                report.malformed_encoding += 1;
                if report.malformed_encoding <= MAX_LOGGED_PER_KIND {
                    warn!(source, row = row_no, error = %e, "skipping undecodable row");
                }
                continue;
            }
        };

        if row.len() < min_fields {
            report.malformed_field_count += 1;
            if report.malformed_field_count <= MAX_LOGGED_PER_KIND {
                warn!(source, row = row_no, fields = row.len(), "skipping short row");
            }
            continue;
        }

        let col = |idx: usize| clean(row.get(idx).unwrap_or(""));

        if col(columns.transcriber) != primary_track {
            report.other_track += 1;
            continue;
        }

        let word = col(columns.word);
        if word.is_empty() {
            report.malformed_empty_word += 1;
            if report.malformed_empty_word <= MAX_LOGGED_PER_KIND {
                warn!(source, row = row_no, "skipping row with empty word");
            }
            continue;
        }
        if word.contains(marker) {
            report.uncertain += 1;
            continue;
        }

        let line = match col(columns.line_number).parse::<u32>() {
            Ok(line) => line,
            Err(_) => {
                report.malformed_line_number += 1;
                if report.malformed_line_number <= MAX_LOGGED_PER_KIND {
                    warn!(
                        source,
                        row = row_no,
                        value = col(columns.line_number),
                        "skipping row with unparsable line number"
                    );
                }
                continue;
            }
        };

        let system = match System::from_language_code(col(columns.language)) {
            Some(system) => system,
            None => {
                report.malformed_language += 1;
                if report.malformed_language <= MAX_LOGGED_PER_KIND {
                    warn!(
                        source,
                        row = row_no,
                        value = col(columns.language),
                        "skipping row with unknown language code"
                    );
                }
                continue;
            }
        };

        tokens.push(Token {
            word: word.to_string(),
            folio: col(columns.folio).to_string(),
            section: col(columns.section).to_string(),
            line,
            placement: col(columns.placement).to_string(),
            system,
            transcriber: primary_track.to_string(),
        });
    }

    report.tokens_retained = tokens.len();
    if !report.is_clean() {
        warn!(
            source,
            malformed = report.malformed_total(),
            "transcription contained malformed rows"
        );
    }
    span.record(metrics::ROWS_READ, report.rows_read);
    span.record(metrics::TOKENS_RETAINED, report.tokens_retained);
    span.record(metrics::ROWS_MALFORMED, report.malformed_total());
    info!(source, "transcription loaded");
    debug!(source, elapsed_ms = start.elapsed().as_millis() as u64, "read phase done");

    Ok((tokens, report))
}

/// Trim whitespace and one layer of surrounding double quotes.
fn clean(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(trimmed)
}

fn header_error(e: csv::Error, source: &str) -> CorpusError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => CorpusError::Io {
            path: source.to_string(),
            source: io,
        },
        other => CorpusError::Header {
            path: source.to_string(),
            message: format!("{other:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "word\tfolio\tsection\tlanguage\tplacement\tline_number\ttranscriber\n";

    fn read(body: &str) -> (Vec<Token>, LoadReport) {
        let input = format!("{HEADER}{body}");
        read_transcription_from(input.as_bytes(), "<test>", &CorpusConfig::default()).unwrap()
    }

    #[test]
    fn test_primary_track_only() {
        let (tokens, report) = read(
            "daiin\tf1r\tH\tA\tP\t1\tH\n\
             daiin\tf1r\tH\tA\tP\t1\tF\n",
        );
        assert_eq!(tokens.len(), 1);
        assert_eq!(report.other_track, 1);
        assert_eq!(tokens[0].system, System::A);
    }

    #[test]
    fn test_uncertain_tokens_excluded() {
        let (tokens, report) = read("da*n\tf1r\tH\tA\tP\t1\tH\nchol\tf1r\tH\tA\tP\t1\tH\n");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].word, "chol");
        assert_eq!(report.uncertain, 1);
    }

    #[test]
    fn test_malformed_rows_counted_not_fatal() {
        let (tokens, report) = read(
            "short\tf1r\n\
             okal\tf1r\tH\tA\tP\tx\tH\n\
             \tf1r\tH\tA\tP\t2\tH\n\
             okal\tf1r\tH\tZ\tP\t2\tH\n\
             okal\tf1r\tH\tB\tP\t3\tH\n",
        );
        assert_eq!(tokens.len(), 1);
        assert_eq!(report.malformed_field_count, 1);
        assert_eq!(report.malformed_line_number, 1);
        assert_eq!(report.malformed_empty_word, 1);
        assert_eq!(report.malformed_language, 1);
        assert_eq!(report.malformed_total(), 4);
        assert_eq!(report.rows_read, 5);
    }

    #[test]
    fn test_empty_language_is_azc_and_quotes_stripped() {
        let (tokens, _) = read("\"otaly\"\t\"f67r\"\tZ\t\tR1\t4\tH\n");
        assert_eq!(tokens[0].word, "otaly");
        assert_eq!(tokens[0].folio, "f67r");
        assert_eq!(tokens[0].system, System::Azc);
        assert_eq!(tokens[0].placement, "R1");
    }

    #[test]
    fn test_columns_in_any_order() {
        let input = "folio\tword\tline_number\ttranscriber\tlanguage\tsection\tplacement\textra\n\
                     f2v\tqokeey\t3\tH\tB\tB\tP\tignored\n";
        let (tokens, _) =
            read_transcription_from(input.as_bytes(), "<test>", &CorpusConfig::default()).unwrap();
        assert_eq!(tokens[0].word, "qokeey");
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let input = "word\tfolio\n daiin\tf1r\n";
        let result = read_transcription_from(input.as_bytes(), "<test>", &CorpusConfig::default());
        assert!(matches!(
            result,
            Err(CorpusError::MissingColumn { column: "section", .. })
        ));
    }
}
