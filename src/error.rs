use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input for {what}: {value} (expected {expected})")]
    InvalidInput {
        what: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Missing prerequisite: {what}")]
    MissingPrerequisite { what: &'static str },

    #[error("Malformed upload: {reason}")]
    MalformedUpload { reason: String },

    #[error("Ambiguous selection for {stage}: {count} correlations chosen, expected exactly one")]
    AmbiguousSelection { stage: &'static str, count: usize },

    #[error("Cannot join a {below} series with a {above} series")]
    MismatchedSeries {
        below: &'static str,
        above: &'static str,
    },

    #[error("Could not write CSV export: {source}")]
    Export {
        #[source]
        source: csv::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Error reading from stdin: {source}")]
    ReadStdin {
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Error reading file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Error opening table '{path}': {source}")]
    OpenTable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Error creating export file '{path}': {source}")]
    CreateExport {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON for --inputs-json: {source}")]
    ParseInputsJson {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON for --options-json: {source}")]
    ParseOptionsJson {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON in input document: {source}")]
    ParseCmdInputJson {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Could not serialize output to JSON: {source}")]
    SerializeOutput {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Missing input data: provide --input or --inputs-json")]
    MissingInputData,
}

impl AppError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        AppError::MalformedUpload {
            reason: reason.into(),
        }
    }
}
