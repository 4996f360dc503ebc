pub mod config;
pub mod corpus;
pub mod detail;
pub mod error;
pub mod extract;
mod html;
pub mod index;
pub mod metadata;
pub mod persist;
pub mod search;
pub mod similarity;
pub mod tokenizer;

pub use config::CrawlConfig;
pub use corpus::{course_id_from_url, CourseCorpus, CourseRecord};
pub use error::{CatalogError, ExtractError};
pub use html::clean_title;
pub use index::{build_index, InvertedIndex};
pub use search::{search, SearchHit};
pub use similarity::{compare, cosine, TermVector};
