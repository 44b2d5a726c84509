//! Error adapter for converting MergeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use mapstitch::MergeError;

/// Adapter wrapping a [`MergeError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a MergeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MergeError::Io(_) => "mapstitch::io",
            MergeError::Parse(_) => "mapstitch::parse",
            MergeError::NoDocuments => "mapstitch::input",
            MergeError::Raster(_) => "mapstitch::raster",
            MergeError::Scene(_) => "mapstitch::scene",
            MergeError::Descriptor(_) => "mapstitch::descriptor",
            MergeError::Config(_) => "mapstitch::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            MergeError::NoDocuments => "pass at least one battlemap file",
            MergeError::Config(_) => {
                "check the configuration file and the --storage, --bucket, and --region flags"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`MergeError`] into a list of reportable errors.
///
/// Every variant currently renders as a single report; the list shape
/// keeps the rendering loop uniform in `main`.
pub fn to_reportables(err: &MergeError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}
