use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no data directory on this platform; pass --store")]
    NoDataDir,

    #[error("io error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not replace game file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
