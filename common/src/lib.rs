//! Poetry Archive Common Library
//!
//! 詩アーカイブのメタデータ付与パイプライン（CLIとエクスポータで共有）

pub mod types;
pub mod error;
pub mod topics;
pub mod classifier;
pub mod year;
pub mod preview;
pub mod pipeline;

pub use types::{ArchiveData, EnrichedPoem, RawCollection, RawPoem, SourceGroup};
pub use error::{Error, Result};
pub use topics::{Topic, TopicTable};
pub use classifier::{tag, Classifier};
pub use year::parse_year;
pub use preview::{preview, slug};
pub use pipeline::{build_archive, tag_counts, year_counts, PipelineOptions};
