pub mod enrich;
pub mod harvest;
pub mod render;

pub use enrich::{enrich, enrich_corpus, DetailSource, HttpDetailSource};
pub use harvest::{harvest, HarvestConfig};
pub use render::{Renderer, StaticRenderer, WebDriverRenderer};
