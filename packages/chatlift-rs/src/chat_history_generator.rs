//! Batch driver: OCR dumps in, one merged chat history out.
use crate::config::ParserConfig;
use crate::message_row::{sort_rows, write_csv, write_json, ChatHistoryDocument, MessageRow};
use crate::segmenter::ChatParser;
use anyhow::{bail, Result};
use chatlift_ocr::{JsonOcrEngine, OcrEngine, OcrInput};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Options for chat history generation
pub struct ChatHistoryOptions {
    /// OCR dump files, or directories searched recursively for `*.json` dumps
    pub inputs: Vec<PathBuf>,
    pub output_file_path: PathBuf,
    pub format: OutputFormat,
    pub parser_config: ParserConfig,
    /// Maximum number of screenshots to process concurrently
    pub max_concurrent_files: usize,
    /// Sort the merged rows by `(date, time)` before writing
    pub sort_rows: bool,
}

impl Default for ChatHistoryOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_file_path: PathBuf::from("chat_history.csv"),
            format: OutputFormat::Csv,
            parser_config: ParserConfig::default(),
            max_concurrent_files: 4,
            sort_rows: true,
        }
    }
}

/// Rows merged from every screenshot that could be read.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    pub rows: Vec<MessageRow>,
    pub total_images: usize,
    pub failed_images: usize,
}

#[derive(Debug, Clone)]
pub struct ChatHistoryResult {
    pub success: bool,
    pub total_images: usize,
    pub failed_images: usize,
    pub total_rows: usize,
}

pub struct ChatHistoryGenerator {
    options: ChatHistoryOptions,
    engine: Arc<dyn OcrEngine>,
}

impl ChatHistoryGenerator {
    /// Creates a generator that replays saved OCR dumps
    pub fn new(options: ChatHistoryOptions) -> Self {
        Self::with_engine(options, Arc::new(JsonOcrEngine::new()))
    }

    pub fn with_engine(options: ChatHistoryOptions, engine: Arc<dyn OcrEngine>) -> Self {
        Self { options, engine }
    }

    /// Expands the configured inputs into a deterministic list of dump files.
    pub fn discover_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for input in &self.options.inputs {
            if input.is_dir() {
                for entry in WalkDir::new(input).sort_by_file_name() {
                    let entry = entry?;
                    if entry.file_type().is_file() && is_json(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
            } else if input.is_file() {
                files.push(input.clone());
            } else {
                bail!("input does not exist: {}", input.display());
            }
        }
        Ok(files)
    }

    /// Runs OCR and reconstruction for every input. Unreadable screenshots are logged and counted.
    pub async fn reconstruct(&self) -> Result<ChatHistory> {
        let files = self.discover_inputs()?;
        let max_concurrent = self.options.max_concurrent_files.max(1);
        info!(
            images = files.len(),
            max_concurrent, "reconstructing chat history"
        );

        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let parser = ChatParser::new(self.options.parser_config.clone());

        let mut tasks = Vec::with_capacity(files.len());
        for path in files.iter().cloned() {
            let semaphore = semaphore.clone();
            let engine = self.engine.clone();
            let parser = parser.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                let output = engine.recognize(&OcrInput::FilePath(path.clone())).await?;
                let source = output
                    .image_name
                    .clone()
                    .unwrap_or_else(|| display_name(&path));
                let rows = parser.parse(&output.detections, &source, output.dimensions);
                info!(%source, rows = rows.len(), "processed screenshot");
                anyhow::Ok(rows)
            }));
        }

        let mut rows = Vec::new();
        let mut failed_images = 0;
        for (path, task) in files.iter().zip(tasks) {
            match task.await {
                Ok(Ok(mut image_rows)) => rows.append(&mut image_rows),
                Ok(Err(e)) => {
                    failed_images += 1;
                    warn!(path = %path.display(), error = %e, "failed to process screenshot");
                }
                Err(e) => {
                    failed_images += 1;
                    warn!(path = %path.display(), error = %e, "screenshot task did not complete");
                }
            }
        }

        if self.options.sort_rows {
            sort_rows(&mut rows);
        }

        Ok(ChatHistory {
            rows,
            total_images: files.len(),
            failed_images,
        })
    }

    /// Reconstructs every input and writes the merged history to `output_file_path`.
    pub async fn generate(&self) -> Result<ChatHistoryResult> {
        let history = self.reconstruct().await?;
        let total_rows = history.rows.len();

        let mut buffer = Vec::new();
        match self.options.format {
            OutputFormat::Csv => write_csv(&history.rows, &mut buffer)?,
            OutputFormat::Json => write_json(
                &ChatHistoryDocument::new(history.rows, history.total_images),
                &mut buffer,
            )?,
        }

        let output_path = &self.options.output_file_path;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(output_path, buffer).await?;

        info!(
            rows = total_rows,
            images = history.total_images,
            failed = history.failed_images,
            output = %output_path.display(),
            "chat history written"
        );

        Ok(ChatHistoryResult {
            success: history.failed_images == 0,
            total_images: history.total_images,
            failed_images: history.failed_images,
            total_rows,
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::Sender;
    use async_trait::async_trait;
    use chatlift_ocr::{Detection, ImageDimensions, OcrError, OcrOutput, Quad};

    /// Serves fixed detections keyed by file stem; `broken` always fails.
    struct FixtureEngine;

    #[async_trait]
    impl OcrEngine for FixtureEngine {
        async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
            let OcrInput::FilePath(path) = input else {
                return Err(OcrError::Unsupported);
            };
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let detections = match stem {
                "later" => vec![
                    Detection::new(Quad::from_rect(400.0, 290.0, 200.0, 20.0), "13 Jan 2023", 0.9),
                    Detection::new(Quad::from_rect(40.0, 390.0, 200.0, 20.0), "morning!", 0.9),
                ],
                "earlier" => vec![
                    Detection::new(Quad::from_rect(400.0, 290.0, 200.0, 20.0), "12 Jan 2023", 0.9),
                    Detection::new(Quad::from_rect(40.0, 390.0, 200.0, 20.0), "night!", 0.9),
                ],
                _ => return Err(OcrError::EngineError(format!("no fixture for {}", stem))),
            };
            Ok(OcrOutput {
                image_name: None,
                dimensions: ImageDimensions::new(1000.0, 2000.0),
                detections,
            })
        }
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"{}").unwrap();
        path
    }

    #[test]
    fn test_discover_inputs_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        touch(dir.path(), "b.json");
        touch(dir.path(), "a.JSON");
        touch(dir.path(), "notes.txt");
        touch(&dir.path().join("nested"), "c.json");

        let generator = ChatHistoryGenerator::new(ChatHistoryOptions {
            inputs: vec![dir.path().to_path_buf()],
            ..Default::default()
        });
        let names: Vec<String> = generator
            .discover_inputs()
            .unwrap()
            .iter()
            .map(|p| display_name(p))
            .collect();
        assert_eq!(names, vec!["a.JSON", "b.json", "c.json"]);
    }

    #[test]
    fn test_discover_inputs_rejects_missing_path() {
        let generator = ChatHistoryGenerator::new(ChatHistoryOptions {
            inputs: vec![PathBuf::from("/nonexistent/chatlift/input.json")],
            ..Default::default()
        });
        assert!(generator.discover_inputs().is_err());
    }

    #[tokio::test]
    async fn test_reconstruct_merges_sorts_and_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![
            touch(dir.path(), "later.json"),
            touch(dir.path(), "broken.json"),
            touch(dir.path(), "earlier.json"),
        ];
        let generator = ChatHistoryGenerator::with_engine(
            ChatHistoryOptions {
                inputs,
                max_concurrent_files: 2,
                ..Default::default()
            },
            Arc::new(FixtureEngine),
        );

        let history = generator.reconstruct().await.unwrap();
        assert_eq!(history.total_images, 3);
        assert_eq!(history.failed_images, 1);
        let messages: Vec<(&str, &str, Sender)> = history
            .rows
            .iter()
            .map(|r| (r.message.as_str(), r.source.as_str(), r.sender))
            .collect();
        assert_eq!(
            messages,
            vec![
                ("night!", "earlier.json", Sender::Incoming),
                ("morning!", "later.json", Sender::Incoming),
            ]
        );
    }

    #[tokio::test]
    async fn test_reconstruct_keeps_input_order_without_sort() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![touch(dir.path(), "later.json"), touch(dir.path(), "earlier.json")];
        let generator = ChatHistoryGenerator::with_engine(
            ChatHistoryOptions {
                inputs,
                sort_rows: false,
                ..Default::default()
            },
            Arc::new(FixtureEngine),
        );
        let history = generator.reconstruct().await.unwrap();
        let messages: Vec<&str> = history.rows.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["morning!", "night!"]);
    }

    #[tokio::test]
    async fn test_generate_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("chat_history.csv");
        let generator = ChatHistoryGenerator::with_engine(
            ChatHistoryOptions {
                inputs: vec![touch(dir.path(), "earlier.json")],
                output_file_path: output.clone(),
                ..Default::default()
            },
            Arc::new(FixtureEngine),
        );

        let result = generator.generate().await.unwrap();
        assert!(result.success);
        assert_eq!(result.total_rows, 1);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Date,Time,Sender,Message,Source\n12 Jan 2023,,INCOMING,night!,earlier.json\n"
        );
    }

    #[tokio::test]
    async fn test_generate_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("chat_history.json");
        let generator = ChatHistoryGenerator::with_engine(
            ChatHistoryOptions {
                inputs: vec![touch(dir.path(), "earlier.json"), touch(dir.path(), "broken.json")],
                output_file_path: output.clone(),
                format: OutputFormat::Json,
                ..Default::default()
            },
            Arc::new(FixtureEngine),
        );

        let result = generator.generate().await.unwrap();
        assert!(!result.success);
        assert_eq!(result.failed_images, 1);

        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(value["total_images"], 2);
        assert_eq!(value["rows"][0]["Date"], "12 Jan 2023");
    }
}
