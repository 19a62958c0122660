use std::fmt;

use serde::{Deserialize, Serialize};

/// POST /api/import 请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    pub from: i64,
    pub to: i64,
}

/// POST /api/import/popular 请求体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopularImportRequest {
    pub page: Option<u32>,
}

/// 单个 TMDB ID 的导入结果
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported { movie_id: String, title: String },
    AlreadyExists { movie_id: String },
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportedMovie {
    pub tmdb_id: i64,
    pub movie_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyExists { movie_id: String },
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedMovie {
    pub tmdb_id: i64,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportFailure {
    pub tmdb_id: i64,
    pub error: String,
}

/// 批量导入报告
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImportReport {
    pub requested: usize,
    pub imported: Vec<ImportedMovie>,
    pub skipped: Vec<SkippedMovie>,
    pub failed: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn record(&mut self, tmdb_id: i64, outcome: ImportOutcome) {
        self.requested += 1;
        match outcome {
            ImportOutcome::Imported { movie_id, title } => {
                self.imported.push(ImportedMovie { tmdb_id, movie_id, title })
            }
            ImportOutcome::AlreadyExists { movie_id } => self.skipped.push(SkippedMovie {
                tmdb_id,
                reason: SkipReason::AlreadyExists { movie_id },
            }),
            ImportOutcome::NotFound => self.skipped.push(SkippedMovie {
                tmdb_id,
                reason: SkipReason::NotFound,
            }),
            ImportOutcome::Failed(error) => self.failed.push(ImportFailure { tmdb_id, error }),
        }
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            requested: self.requested,
            imported: self.imported.len(),
            skipped: self.skipped.len(),
            failed: self.failed.len(),
        }
    }
}

/// 导入报告的计数摘要，用于响应消息和日志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub requested: usize,
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requested, {} imported, {} skipped, {} failed",
            self.requested, self.imported, self.skipped, self.failed
        )
    }
}
