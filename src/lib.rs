// Find Store Branch - Core Library
// Exposes all modules for use in the CLI, the TUI, and tests

pub mod branch;
pub mod dataset;
pub mod directory;
pub mod matcher;
pub mod quality;

// Re-export commonly used types
pub use branch::{Branch, NetworkInfo, SecurityInfo};
pub use dataset::{
    default_branches, load_csv, load_dataset, load_json, parse_json, read_csv, BranchRow,
};
pub use directory::BranchDirectory;
pub use matcher::{find_branch, SearchQuery};
pub use quality::{check_directory, DirectoryIssue, DirectoryReport, Severity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
