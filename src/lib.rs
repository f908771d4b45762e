pub mod config;
pub mod describe;
pub mod error;
pub mod keywords;
pub mod parentdir;
pub mod resolve;
pub mod ui;
pub mod vcs;
pub mod version_info;

pub use error::{Result, SrcverError};
pub use version_info::VersionInfo;
