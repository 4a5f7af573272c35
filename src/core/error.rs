use thiserror::Error;

/// Errors that can occur while generating customs export artifacts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Template workbook missing or unreadable.
    #[error("template load error: {0}")]
    TemplateLoad(String),

    /// Required keys absent from the invocation payload, or the payload
    /// is not valid JSON.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A cost, percentage, or count field could not be coerced to its
    /// declared numeric type.
    #[error("numeric conversion error: {0}")]
    NumericConversion(String),

    /// Destination path could not be written.
    #[error("output write error: {0}")]
    OutputWrite(String),

    /// Workbook structure error (e.g. template without a worksheet).
    #[error("worksheet error: {0}")]
    Worksheet(String),

    /// Object storage listing or download failure.
    #[error("storage error: {0}")]
    Storage(String),
}
