pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Diagram parse error: {message}")]
    DiagramParse { message: String },

    #[error("Failed to load icon asset `{locator}`: {message}")]
    AssetLoad { locator: String, message: String },

    #[error("Diagram synthesis failed after {attempts} attempt(s): {message}")]
    SynthesisExhausted { attempts: u32, message: String },

    #[error("Proposal generation failed: {message}")]
    Generation { message: String },
}

impl Error {
    /// Wraps a grammar rejection from the external diagram-conversion step.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::DiagramParse {
            message: message.into(),
        }
    }
}
