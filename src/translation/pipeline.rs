use log::{debug, info};

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::providers::CompletionClient;
use crate::session::SessionLogger;
use crate::subtitle_processor::{chunk_entries, SubtitleCollection, SubtitleEntry};

use super::extractor::extract_mapping;
use super::request::{build_chunk_request, build_prompt};
use super::validation::validate_mapping;
use super::TranslationMapping;

// @module: Sequential chunk-by-chunk pipeline driver

/// Structured progress events emitted while a job runs
///
/// Consumed by a caller-supplied callback so observability stays decoupled
/// from the pipeline's control logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A job started with this many chunks and entries
    JobStarted {
        /// Total chunks to process
        total_chunks: usize,
        /// Total entries across all chunks
        total_entries: usize,
    },

    /// A chunk's request/extract/validate cycle began
    ChunkStarted {
        /// 1-based chunk number
        chunk: usize,
        /// Total chunks in the job
        total_chunks: usize,
        /// Entries in this chunk
        entries: usize,
    },

    /// The completion for a chunk looked truncated (non-fatal)
    ResponseTruncated {
        /// 1-based chunk number
        chunk: usize,
    },

    /// A chunk's mapping passed validation and joined the aggregate
    ChunkValidated {
        /// 1-based chunk number
        chunk: usize,
        /// Total chunks in the job
        total_chunks: usize,
    },

    /// A chunk failed terminally; the job aborts
    ChunkFailed {
        /// 1-based chunk number
        chunk: usize,
        /// Total chunks in the job
        total_chunks: usize,
        /// Failure description
        reason: String,
    },
}

/// Sequential translation pipeline over a completion client
///
/// Chunks are processed strictly one at a time, in order. Transport retry
/// lives inside the client; an extraction or validation failure after a
/// successful completion is terminal for the chunk and therefore for the
/// job. No partial output is ever produced.
pub struct TranslationPipeline<C: CompletionClient> {
    /// Completion client for the remote endpoint
    client: C,

    /// Job configuration
    config: Config,

    /// Optional per-session debug artifact writer
    session: Option<SessionLogger>,
}

impl<C: CompletionClient> TranslationPipeline<C> {
    /// Create a new pipeline
    pub fn new(client: C, config: Config) -> Self {
        TranslationPipeline { client, config, session: None }
    }

    /// Attach a session logger for per-attempt debug artifacts
    pub fn with_session(mut self, session: SessionLogger) -> Self {
        self.session = Some(session);
        self
    }

    /// Translate a whole collection, returning the job-wide mapping
    ///
    /// Aborts on the first chunk that cannot be reconciled; the aggregate is
    /// only returned once every chunk has individually validated.
    pub async fn translate_all(
        &self,
        collection: &SubtitleCollection,
        mut on_event: impl FnMut(ProgressEvent),
    ) -> Result<TranslationMapping, TranslationError> {
        let chunks = chunk_entries(
            &collection.entries,
            self.config.chunking.max_entries_per_chunk,
            self.config.chunking.enabled,
        )?;

        let total_chunks = chunks.len();
        on_event(ProgressEvent::JobStarted {
            total_chunks,
            total_entries: collection.entries.len(),
        });

        let mut aggregate = TranslationMapping::with_capacity(collection.entries.len());

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            let chunk_no = chunk_index + 1;
            if chunk.is_empty() {
                continue;
            }

            on_event(ProgressEvent::ChunkStarted {
                chunk: chunk_no,
                total_chunks,
                entries: chunk.len(),
            });

            let received = self
                .translate_chunk(chunk, chunk_no, total_chunks, &mut on_event)
                .await?;

            // Chunks partition the input, so key sets are disjoint
            aggregate.extend(received);

            on_event(ProgressEvent::ChunkValidated { chunk: chunk_no, total_chunks });
        }

        info!("All {} chunks validated ({} entries)", total_chunks, aggregate.len());
        Ok(aggregate)
    }

    /// Run one chunk through request, completion, extraction and validation
    async fn translate_chunk(
        &self,
        chunk: &[SubtitleEntry],
        chunk_no: usize,
        total_chunks: usize,
        on_event: &mut impl FnMut(ProgressEvent),
    ) -> Result<TranslationMapping, TranslationError> {
        let request = build_chunk_request(chunk);
        let prompt = build_prompt(
            &self.config.source_language,
            &self.config.target_language,
            &request,
        );
        debug!(
            "Chunk {}/{}: prompt ready ({} chars, {} entries)",
            chunk_no,
            total_chunks,
            prompt.len(),
            request.entry_count
        );

        if let Some(session) = &self.session {
            session.record(&format!("prompt_chunk{}of{}.txt", chunk_no, total_chunks), &prompt);
        }

        let completion = self.client.complete(&prompt).await.map_err(|e| {
            on_event(ProgressEvent::ChunkFailed {
                chunk: chunk_no,
                total_chunks,
                reason: e.to_string(),
            });
            TranslationError::from(e)
        })?;

        if let Some(session) = &self.session {
            session.record(
                &format!("response_chunk{}of{}.txt", chunk_no, total_chunks),
                &completion.text,
            );
        }

        if completion.maybe_truncated {
            on_event(ProgressEvent::ResponseTruncated { chunk: chunk_no });
            if let Some(session) = &self.session {
                let tail: String = completion.text.chars().rev().take(200).collect::<Vec<_>>()
                    .into_iter().rev().collect();
                session.record(
                    &format!("warning_truncated_chunk{}of{}.txt", chunk_no, total_chunks),
                    &format!("Response appears truncated, tail:\n{}", tail),
                );
            }
        }

        let received = extract_mapping(&completion.text);
        if received.is_empty() {
            let error = TranslationError::Extraction { chunk: chunk_no };
            on_event(ProgressEvent::ChunkFailed {
                chunk: chunk_no,
                total_chunks,
                reason: error.to_string(),
            });
            return Err(error);
        }
        debug!("Chunk {}/{}: extracted {} entries", chunk_no, total_chunks, received.len());

        let report = validate_mapping(&request.mapping, &received);
        if let Some(session) = &self.session {
            session.record(
                &format!("validation_chunk{}of{}.txt", chunk_no, total_chunks),
                &report.summary(),
            );
        }

        if !report.is_valid() {
            let error = TranslationError::Validation {
                chunk: chunk_no,
                missing: report.missing,
                extra: report.extra,
            };
            on_event(ProgressEvent::ChunkFailed {
                chunk: chunk_no,
                total_chunks,
                reason: error.to_string(),
            });
            return Err(error);
        }

        Ok(received)
    }
}

/// Rejoin translated text with original timing metadata
///
/// Output is sorted by numeric index ascending; timing is always sourced
/// from the original entry, never from the model. A missing key here means a
/// pipeline invariant was violated upstream.
pub fn merge_translations(
    originals: &[SubtitleEntry],
    mapping: &TranslationMapping,
) -> Result<Vec<SubtitleEntry>, TranslationError> {
    let mut merged = Vec::with_capacity(originals.len());

    for entry in originals {
        let translated = mapping.get(&entry.index).ok_or_else(|| {
            TranslationError::InternalConsistency(format!(
                "No translation for index {} despite validated chunks",
                entry.index
            ))
        })?;

        merged.push(SubtitleEntry {
            index: entry.index.clone(),
            time: entry.time.clone(),
            text: translated.clone(),
        });
    }

    merged.sort_by_key(|entry| entry.numeric_index());
    Ok(merged)
}
