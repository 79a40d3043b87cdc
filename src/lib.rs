pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod gh;
pub mod git;
pub mod launcher;
pub mod output;
pub mod pr;
pub mod report;
pub mod rules;

#[cfg(test)]
pub mod test_utils;

pub use config::RuleConfig;
pub use error::{Result, WardenError};
pub use pr::{Commit, FileChangeSet, MainlinePrLink, PrDetail, PrLookup, PrSnapshot, PrStatus};
pub use rules::{Evaluator, Finding};
