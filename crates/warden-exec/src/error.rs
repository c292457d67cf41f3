use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("cannot spawn deployment tool for '{instance}': {source}")]
    Spawn {
        instance: String,
        #[source]
        source: std::io::Error,
    },
}
