//! skinchart: keyword-derived skin profiles with LLM skincare advice
//!
//! Users describe their skin in free text. Each message is run through a
//! fixed keyword extractor and merged into a per-user medical chart, which
//! is later summarized into the prompt sent to an advice service.
//!
//! # Core Concepts
//!
//! - **Chart**: the accumulated skin profile for one user
//! - **Extraction**: literal keyword and cue-phrase matching over text
//! - **Merge**: monotonic, idempotent folding of facts into a chart
//!
//! # Example
//!
//! ```
//! use skinchart::{merge, ChartExtractor, MedicalChart, SkinType};
//!
//! let facts = ChartExtractor::new().extract("My skin gets really oily");
//! let chart = merge(&MedicalChart::new(), &facts);
//! assert_eq!(chart.skin_type, Some(SkinType::Oily));
//! ```

pub mod advice;
mod chart;
pub mod config;
pub mod extract;
pub mod server;
pub mod service;
pub mod storage;

pub use advice::{
    AdviceClient, AdviceComposer, AdviceError, AdvicePrompt, MockAdviceClient, PerplexityClient,
};
pub use chart::{ChartEdit, MedicalChart, SkinConcern, SkinType, UserId};
pub use config::{AdviceConfig, Config, ConfigError, StoreKind};
pub use extract::{apply_edit, merge, ChartExtractor, ExtractedFacts};
pub use service::{ChartService, ServiceError, ServiceResult, Session};
pub use storage::{ChartStore, JsonFileStore, MemoryStore, SqliteStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
