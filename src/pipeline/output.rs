//! Output target selection for audit reports.

use std::io::IsTerminal;
use std::path::PathBuf;

use crate::reports::JsonReportSink;

/// Target for JSON output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a single file
    File(PathBuf),
    /// Write `<dir>/<account-slug>/<date>.json` per account
    Directory(PathBuf),
}

impl OutputTarget {
    /// Create an output target from the CLI options; a file wins over a directory
    #[must_use]
    pub fn from_options(file: Option<PathBuf>, dir: Option<PathBuf>) -> Self {
        match (file, dir) {
            (Some(file), _) => Self::File(file),
            (None, Some(dir)) => Self::Directory(dir),
            (None, None) => Self::Stdout,
        }
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }

    /// JSON sink writing to this target
    #[must_use]
    pub fn json_sink(&self, pretty: bool) -> JsonReportSink {
        let sink = match self {
            Self::Stdout => JsonReportSink::stdout(),
            Self::File(path) => JsonReportSink::file(path.clone()),
            Self::Directory(dir) => JsonReportSink::directory(dir.clone()),
        };
        sink.pretty(pretty)
    }
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_options() {
        assert_eq!(OutputTarget::from_options(None, None), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_options(None, Some(PathBuf::from("out"))),
            OutputTarget::Directory(PathBuf::from("out"))
        );
        assert_eq!(
            OutputTarget::from_options(Some(PathBuf::from("a.json")), Some(PathBuf::from("out"))),
            OutputTarget::File(PathBuf::from("a.json"))
        );
    }

    #[test]
    fn test_file_target_is_not_terminal() {
        assert!(!OutputTarget::File(PathBuf::from("a.json")).is_terminal());
    }

    #[test]
    fn test_should_use_color_with_flag() {
        assert!(!should_use_color(true));
    }
}
