// src/store.rs
//! JSON-file candidate collection. Contact fields are hashed before they touch disk.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::types::{CandidateRecord, Sentiment};
use crate::utils::{hash_sensitive_data, parse_tech_stack};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCandidate {
    pub name: String,
    /// SHA-256 hex digest, empty when no email was given
    pub email: String,
    /// SHA-256 hex digest, empty when no phone was given
    pub phone: String,
    pub experience: String,
    pub position: String,
    pub location: String,
    pub tech_stack: Vec<String>,
    pub normalized_tech_stack: Vec<String>,
    pub tech_questions_asked: bool,
    pub sentiment_history: Vec<Sentiment>,
    pub saved_at: DateTime<Utc>,
}

fn hash_if_present(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        hash_sensitive_data(value)
    }
}

impl StoredCandidate {
    pub fn from_record(record: &CandidateRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: hash_if_present(&record.email),
            phone: hash_if_present(&record.phone),
            experience: record.experience.clone(),
            position: record.position.clone(),
            location: record.location.clone(),
            tech_stack: record.tech_stack.clone(),
            normalized_tech_stack: parse_tech_stack(&record.tech_stack.join(",")),
            tech_questions_asked: record.tech_questions_asked,
            sentiment_history: record.sentiment_history.clone(),
            saved_at: Utc::now(),
        }
    }
}

pub struct CandidateStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CandidateStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection. A missing or unparsable file yields an empty collection.
    pub async fn load(&self) -> Vec<StoredCandidate> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Cannot read {}: {}", self.path.display(), e);
                }
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    "Candidate file {} is corrupt, starting a fresh collection: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Hash and append one record. Returns the new collection size.
    pub async fn append(&self, record: &CandidateRecord) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let mut candidates = self.load().await;
        candidates.push(StoredCandidate::from_record(record));

        let json = serde_json::to_string_pretty(&candidates)
            .context("Failed to serialize candidates")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;

        info!(
            "Saved candidate '{}' ({} stored)",
            record.name,
            candidates.len()
        );
        Ok(candidates.len())
    }

    /// Write every stored candidate as one CSV row
    pub async fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let candidates = self.load().await;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record([
                "name",
                "email_hash",
                "phone_hash",
                "experience",
                "position",
                "location",
                "tech_stack",
                "tech_questions_asked",
                "saved_at",
            ])
            .context("Failed to write CSV header")?;

        for candidate in &candidates {
            csv_writer
                .write_record([
                    candidate.name.as_str(),
                    candidate.email.as_str(),
                    candidate.phone.as_str(),
                    candidate.experience.as_str(),
                    candidate.position.as_str(),
                    candidate.location.as_str(),
                    candidate.tech_stack.join("; ").as_str(),
                    if candidate.tech_questions_asked {
                        "true"
                    } else {
                        "false"
                    },
                    candidate.saved_at.to_rfc3339().as_str(),
                ])
                .with_context(|| format!("Failed to write CSV row for {}", candidate.name))?;
        }

        csv_writer.flush().context("Failed to flush CSV output")?;
        Ok(candidates.len())
    }
}
