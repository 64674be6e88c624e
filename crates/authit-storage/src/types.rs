use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Directory under `$HOME` holding the client configuration.
pub const CONFIG_DIR: &str = ".config/authit";
pub const SECRET_FILE_NAME: &str = ".env";
/// Key of the persisted digest line, `HASH=<hex>`.
pub const SECRET_KEY: &str = "HASH";

pub const CONFIG_DIR_MODE: u32 = 0o755;
pub const SECRET_FILE_MODE: u32 = 0o600;

#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("cannot locate home directory: HOME is not set")]
    NoHomeDirectory,

    #[error("cannot create config directory {path}: {source}")]
    FailToCreateConfigDir { path: PathBuf, source: io::Error },
    #[error("cannot read secret file {path}: {source}")]
    FailToReadSecret { path: PathBuf, source: io::Error },
    #[error("cannot write secret file {path}: {source}")]
    FailToWriteSecret { path: PathBuf, source: io::Error },

    #[error("secret file {path} holds an empty or corrupt digest and was removed")]
    CorruptSecret { path: PathBuf },

    #[error("no secret entered")]
    EmptySecret,
    #[error("no secret stored and stdin is not a terminal; run once interactively to store it")]
    NotInteractive,
    #[error("secret prompt aborted")]
    PromptAborted,
    #[error("cannot prompt for secret: {0}")]
    FailToPrompt(#[source] io::Error),
}
