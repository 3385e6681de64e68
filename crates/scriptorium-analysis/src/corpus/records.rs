//! Record grouping: by (folio, line) and by gallows-initial paragraph.

use scriptorium_core::types::collections::FxHashMap;
use scriptorium_core::types::{RecordId, System};

use crate::morphology::{Decomposer, Vocabulary};

use super::types::{Record, Token};

/// Tokens of one (folio, line), in file order.
struct LineRun<'a> {
    folio: &'a str,
    line: u32,
    tokens: Vec<&'a Token>,
}

/// Collect line runs keyed by (folio, line), ordered by first appearance.
fn line_runs(tokens: &[Token]) -> Vec<LineRun<'_>> {
    let mut runs: Vec<LineRun<'_>> = Vec::new();
    let mut index: FxHashMap<(&str, u32), usize> = FxHashMap::default();
    for token in tokens {
        let slot = *index
            .entry((token.folio.as_str(), token.line))
            .or_insert_with(|| {
                runs.push(LineRun {
                    folio: token.folio.as_str(),
                    line: token.line,
                    tokens: Vec::new(),
                });
                runs.len() - 1
            });
        runs[slot].tokens.push(token);
    }
    runs
}

/// Accumulates one record before its vocabulary is computed.
#[derive(Debug)]
struct RecordBuilder {
    id: RecordId,
    folio: String,
    system: System,
    lines: Vec<u32>,
    words: Vec<String>,
}

impl RecordBuilder {
    fn open(id: RecordId, folio: &str, system: System) -> Self {
        Self {
            id,
            folio: folio.to_string(),
            system,
            lines: Vec::new(),
            words: Vec::new(),
        }
    }

    fn extend(&mut self, run: &LineRun<'_>) {
        self.lines.push(run.line);
        self.words.extend(run.tokens.iter().map(|t| t.word.clone()));
    }

    fn finish(self, decomposer: &Decomposer) -> Record {
        let vocabulary: Vocabulary = self.words.iter().map(|w| decomposer.extract(w)).collect();
        Record {
            id: self.id,
            folio: self.folio,
            system: self.system,
            lines: self.lines,
            words: self.words,
            vocabulary,
        }
    }
}

/// One record per (folio, line), in order of first appearance.
pub fn group_by_line(tokens: &[Token], decomposer: &Decomposer) -> Vec<Record> {
    line_runs(tokens)
        .iter()
        .filter_map(|run| {
            let first = run.tokens.first()?;
            let mut builder =
                RecordBuilder::open(RecordId::line(run.folio, run.line), run.folio, first.system);
            builder.extend(run);
            Some(builder.finish(decomposer))
        })
        .collect()
}

/// Single-state trigger automaton for paragraph segmentation.
///
/// The only state is the paragraph being built. A line whose first token
/// starts with a gallows character closes it and opens a new one; any other
/// line extends it. A folio boundary always opens a new paragraph.
/// Ordinals count per folio, so a folio that reappears later continues
/// its numbering.
pub(crate) struct ParagraphSegmenter<'g> {
    gallows: &'g [char],
    current: Option<RecordBuilder>,
    ordinals: FxHashMap<String, u32>,
    emitted: Vec<RecordBuilder>,
}

impl<'g> ParagraphSegmenter<'g> {
    pub(crate) fn new(gallows: &'g [char]) -> Self {
        Self {
            gallows,
            current: None,
            ordinals: FxHashMap::default(),
            emitted: Vec::new(),
        }
    }

    /// Whether a line starting with `word` opens a paragraph.
    pub(crate) fn is_trigger(&self, word: &str) -> bool {
        word.chars()
            .next()
            .and_then(|c| c.to_lowercase().next())
            .is_some_and(|c| self.gallows.contains(&c))
    }

    fn feed(&mut self, run: &LineRun<'_>) {
        let Some(first) = run.tokens.first() else {
            return;
        };
        let folio_changed = self
            .current
            .as_ref()
            .map_or(true, |p| p.folio != run.folio);

        if folio_changed || self.is_trigger(&first.word) {
            let ordinal = self.ordinals.entry(run.folio.to_string()).or_insert(0);
            *ordinal += 1;
            let next = RecordBuilder::open(
                RecordId::paragraph(run.folio, *ordinal),
                run.folio,
                first.system,
            );
            if let Some(done) = self.current.replace(next) {
                self.emitted.push(done);
            }
        }
        if let Some(current) = self.current.as_mut() {
            current.extend(run);
        }
    }

    fn finish(mut self, decomposer: &Decomposer) -> Vec<Record> {
        if let Some(done) = self.current.take() {
            self.emitted.push(done);
        }
        self.emitted
            .into_iter()
            .map(|b| b.finish(decomposer))
            .collect()
    }
}

/// One record per paragraph, in file order.
pub fn group_by_paragraph(
    tokens: &[Token],
    gallows: &[char],
    decomposer: &Decomposer,
) -> Vec<Record> {
    let mut segmenter = ParagraphSegmenter::new(gallows);
    for run in line_runs(tokens) {
        segmenter.feed(&run);
    }
    segmenter.finish(decomposer)
}
