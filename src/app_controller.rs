use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::providers::chat_completions::ChatCompletionsClient;
use crate::session::SessionLogger;
use crate::subtitle_processor::SubtitleCollection;
use crate::translation::{merge_translations, ProgressEvent, TranslationMapping, TranslationPipeline};

// @module: Main application controller

/// Application controller driving the full translate-a-file workflow
pub struct Controller {
    /// Application configuration
    config: Config,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Controller { config })
    }

    /// Translate one SRT file end to end
    ///
    /// Parses the input, runs the chunked pipeline, merges timing back and
    /// writes the output. Any unrecoverable chunk failure aborts the job
    /// before anything is written; there is no partial output.
    pub async fn run(&self, input_path: &Path, output_path: Option<&Path>) -> Result<()> {
        if !FileManager::file_exists(input_path) {
            return Err(anyhow!("Input file not found: {}", input_path.display()));
        }

        let output_path: PathBuf = match output_path {
            Some(path) => path.to_path_buf(),
            None => FileManager::generate_output_path(
                input_path,
                &self.config.target_language,
                "srt",
            ),
        };

        info!(
            "Translating {} -> {} ({} to {})",
            input_path.display(),
            output_path.display(),
            self.config.source_language,
            self.config.target_language
        );

        let content = FileManager::read_to_string(input_path)?;
        let collection = SubtitleCollection::parse_srt_string(input_path.to_path_buf(), &content)
            .with_context(|| format!("Failed to parse SRT file: {}", input_path.display()))?;
        info!("Parsed {} subtitle entries", collection.entries.len());

        // Session artifacts are diagnostics only; run without them if the
        // directory cannot be created
        let session = match SessionLogger::create(&self.config.debug_dir) {
            Ok(session) => {
                debug!(
                    "Debug session {} at {}",
                    session.session_id(),
                    session.session_dir().display()
                );
                session.record("00_original.srt", &content);
                session.record_json("01_parsed_structure.json", &collection.entries);
                Some(session)
            },
            Err(e) => {
                warn!("Could not create debug session directory: {}", e);
                None
            }
        };

        let client = ChatCompletionsClient::from_config(&self.config.provider);
        let mut pipeline = TranslationPipeline::new(client, self.config.clone());
        if let Some(session) = &session {
            pipeline = pipeline.with_session(session.clone());
        }

        let mapping = pipeline
            .translate_all(&collection, log_progress)
            .await
            .context("Translation job failed; no output was written")?;

        let merged = merge_translations(&collection.entries, &mapping)?;

        let translated = SubtitleCollection::new(output_path.clone(), merged);
        translated.write_to_srt(&output_path)?;
        if let Some(session) = &session {
            session.record_json("99_final_output.json", &translated.entries);
        }
        info!(
            "Saved {} translated entries to {}",
            translated.entries.len(),
            output_path.display()
        );

        self.save_translation_log(input_path, &mapping);

        Ok(())
    }

    /// Persist the job-wide mapping for later reuse, keyed by input stem and
    /// target language. Best-effort.
    fn save_translation_log(&self, input_path: &Path, mapping: &TranslationMapping) {
        let stem = input_path.file_stem().unwrap_or_default().to_string_lossy();
        let log_path = Path::new(&self.config.log_dir)
            .join(format!("{}_translated_{}.json", stem, self.config.target_language));

        let result = serde_json::to_string_pretty(mapping)
            .context("Failed to serialize translation mapping")
            .and_then(|json| FileManager::write_to_file(&log_path, &json));

        match result {
            Ok(()) => info!("Saved translation log: {}", log_path.display()),
            Err(e) => warn!("Could not save translation log: {}", e),
        }
    }
}

/// Forward pipeline progress events to the logger
fn log_progress(event: ProgressEvent) {
    match event {
        ProgressEvent::JobStarted { total_chunks, total_entries } => {
            info!("Starting translation: {} entries in {} chunk(s)", total_entries, total_chunks);
        },
        ProgressEvent::ChunkStarted { chunk, total_chunks, entries } => {
            info!("Processing chunk {}/{} ({} entries)", chunk, total_chunks, entries);
        },
        ProgressEvent::ResponseTruncated { chunk } => {
            warn!("Chunk {}: response may be truncated", chunk);
        },
        ProgressEvent::ChunkValidated { chunk, total_chunks } => {
            info!("Chunk {}/{} validated", chunk, total_chunks);
        },
        ProgressEvent::ChunkFailed { chunk, total_chunks, reason } => {
            error!("Chunk {}/{} failed: {}", chunk, total_chunks, reason);
        },
    }
}
