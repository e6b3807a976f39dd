//! Execution context for a single invocation
//!
//! The context carries the settings an operation runs with and gates
//! diagnostic output by verbosity. Diagnostics go to stderr so stdout only
//! ever holds the status line.

use crate::attributes::AttributeSchema;
use crate::config::Settings;
use colored::Colorize;
use std::path::PathBuf;

/// Execution context for one command invocation
pub struct Context {
    /// Resolved settings
    pub settings: Settings,

    /// Settings file the values came from, if any
    pub settings_path: Option<PathBuf>,

    /// Verbosity level
    pub verbosity: Verbosity,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            settings: Settings::default(),
            settings_path: None,
            verbosity: Verbosity::Normal,
        }
    }

    /// Set the resolved settings
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the settings file path
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Attribute schema used by `create`
    pub fn schema(&self) -> &AttributeSchema {
        &self.settings.attributes
    }

    /// Whether the status line should be printed
    pub fn prints_status(&self) -> bool {
        self.verbosity > Verbosity::Silent
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[INFO]".blue(), message);
        }
    }

    /// Print warning message
    pub fn print_warning(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[WARN]".yellow(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[DEBUG]".dimmed(), message);
        }
    }

    /// Print the start of a remote call
    pub fn print_call(&self, operation: &str, target: &str) {
        self.print_debug(&format!("Calling {} for {}", operation, target));
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
