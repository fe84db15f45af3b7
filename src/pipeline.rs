//! End-to-end ranking pipeline.
//!
//! Stages run strictly in order and each one finishes before the next
//! starts: extract every document, build the corpus, fit the model once,
//! score, rank, format.

use chrono::{DateTime, Local};

use crate::config::RankConfig;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::extract::SectionExtractor;
use crate::input::InputSpec;
use crate::rank::{rank, RankedSection};
use crate::relevance::TfidfModel;
use crate::render::{write_output, JsonFormat, OutputRecord};
use crate::score::Scorer;
use crate::source::{PageTextSource, PdfPageSource};

/// A configured pipeline bound to a page text source.
pub struct Pipeline<S> {
    config: RankConfig,
    source: S,
    extractor: SectionExtractor,
}

impl Pipeline<PdfPageSource> {
    /// Pipeline reading PDFs from `config.pdf_dir`.
    pub fn from_config(config: RankConfig) -> Result<Self> {
        let source = PdfPageSource::new(config.pdf_dir.clone());
        Self::with_source(config, source)
    }
}

impl<S: PageTextSource> Pipeline<S> {
    /// Pipeline with an explicit page source.
    pub fn with_source(config: RankConfig, source: S) -> Result<Self> {
        config.validate()?;
        let extractor = SectionExtractor::new().with_body_lines(config.body_lines);
        Ok(Self {
            config,
            source,
            extractor,
        })
    }

    /// The run configuration.
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Extract every listed document into one corpus.
    ///
    /// Documents that cannot be loaded are logged and contribute nothing.
    /// `on_document` is called after each document with its id and section
    /// count.
    pub fn extract_corpus<F>(&self, filenames: &[String], mut on_document: F) -> Corpus
    where
        F: FnMut(&str, usize),
    {
        let mut per_document = Vec::with_capacity(filenames.len());
        for filename in filenames {
            let sections = match self.source.load(filename) {
                Ok(document) => self.extractor.extract(&document),
                Err(e) => {
                    log::warn!("Skipping {} ({} source): {}", filename, self.source.name(), e);
                    Vec::new()
                }
            };
            on_document(filename, sections.len());
            per_document.push(sections);
        }
        Corpus::build(per_document)
    }

    /// Score and rank a corpus.
    pub fn rank_corpus(&self, corpus: Corpus) -> Result<Vec<RankedSection>> {
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let model = TfidfModel::fit(&corpus.texts())?;
        let scorer = Scorer::from_config(&self.config);
        let scored = scorer.score(corpus, &model, &self.config.query);
        let ranked = rank(scored, self.config.top_k);

        log::info!(
            "Ranked {} sections, kept {}",
            model.document_count(),
            ranked.len()
        );
        Ok(ranked)
    }

    /// Run every stage for `input` and return the output record.
    pub fn run(&self, input: &InputSpec, processed_at: DateTime<Local>) -> Result<OutputRecord> {
        self.run_with_progress(input, processed_at, |_, _| {})
    }

    /// Like [`run`](Self::run), reporting each extracted document.
    pub fn run_with_progress<F>(
        &self,
        input: &InputSpec,
        processed_at: DateTime<Local>,
        on_document: F,
    ) -> Result<OutputRecord>
    where
        F: FnMut(&str, usize),
    {
        let filenames = input.filenames();
        let corpus = self.extract_corpus(&filenames, on_document);
        log::info!(
            "Extracted {} sections from {} documents",
            corpus.len(),
            filenames.len()
        );

        let ranked = self.rank_corpus(corpus)?;
        Ok(OutputRecord::build(input, &ranked, processed_at))
    }

    /// Load the input record from `config.input_path`, run, and write the
    /// result to `config.output_path`.
    pub fn run_files(&self) -> Result<OutputRecord> {
        let input = InputSpec::load(&self.config.input_path)?;
        let record = self.run(&input, Local::now())?;
        write_output(&record, &self.config.output_path, JsonFormat::Pretty)?;
        Ok(record)
    }
}
