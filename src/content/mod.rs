//! Content module - post records, projection and markdown rendering

mod error;
pub mod frontmatter;
pub mod highlight;
pub mod markdown;
pub mod projection;
mod record;
pub mod store;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use highlight::Highlighter;
pub use markdown::{NodeKind, RenderNode, RendererTable};
pub use projection::{project, ProjectedRecord};
pub use record::{Author, ContentRecord, OgImage, Post};
pub use store::ContentStore;
