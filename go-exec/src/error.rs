use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required tool: {0}")]
    MissingTool(String),

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
