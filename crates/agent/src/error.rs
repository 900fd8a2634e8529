use std::path::PathBuf;

use roadwatch_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Display unavailable at {target}: {source}")]
    DisplayInit {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Journal unavailable at {}: {}", .path.display(), .source)]
    JournalInit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
