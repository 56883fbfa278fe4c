//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::OgConfig;
pub use site::SiteConfig;
