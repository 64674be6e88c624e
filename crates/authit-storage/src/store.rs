use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use authit_auth::SecretDigest;

use crate::prompt::SecretPrompt;
use crate::types::{
    SecretStoreError, CONFIG_DIR, CONFIG_DIR_MODE, SECRET_FILE_MODE, SECRET_FILE_NAME, SECRET_KEY,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretStoreConfig {
    config_dir: PathBuf,
    file_name: String,
}

impl SecretStoreConfig {
    pub fn new(config_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            file_name: file_name.into(),
        }
    }

    /// `<home>/.config/authit/.env`
    pub fn for_home(home: impl AsRef<Path>) -> Self {
        Self::new(home.as_ref().join(CONFIG_DIR), SECRET_FILE_NAME)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn secret_path(&self) -> PathBuf {
        self.config_dir.join(&self.file_name)
    }
}

/// `$HOME/.config/authit/.env`
pub fn default_secret_store_config() -> Result<SecretStoreConfig, SecretStoreError> {
    let home = std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .ok_or(SecretStoreError::NoHomeDirectory)?;

    Ok(SecretStoreConfig::for_home(home))
}

/// File backed store of the secret digest.
#[derive(Debug, Clone)]
pub struct SecretStore {
    config: SecretStoreConfig,
}

impl SecretStore {
    pub fn new(config: SecretStoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SecretStoreConfig {
        &self.config
    }

    /// Read the persisted digest.
    ///
    /// `Ok(None)` when there is no file or no `HASH=` line in it. An empty or
    /// malformed digest removes the file and fails.
    pub fn read(&self) -> Result<Option<SecretDigest>, SecretStoreError> {
        let path = self.config.secret_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SecretStoreError::FailToReadSecret { path, source }),
        };

        let prefix = format!("{}=", SECRET_KEY);
        let value = match content.lines().find_map(|line| line.strip_prefix(prefix.as_str())) {
            Some(value) => value.trim(),
            None => return Ok(None),
        };

        match SecretDigest::from_hex(value) {
            Ok(digest) => Ok(Some(digest)),
            Err(e) => {
                log::error!("stored secret in {} is invalid: {}", path.display(), e);
                if let Err(e) = fs::remove_file(&path) {
                    log::error!("cannot remove {}: {}", path.display(), e);
                }
                Err(SecretStoreError::CorruptSecret { path })
            }
        }
    }

    /// Persist the digest as a single `HASH=<hex>` line, owner read/write only.
    pub fn write(&self, digest: &SecretDigest) -> Result<(), SecretStoreError> {
        self.ensure_config_dir()?;

        let path = self.config.secret_path();
        let write = || -> io::Result<()> {
            let mut options = fs::OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(SECRET_FILE_MODE);
            }

            let mut file = options.open(&path)?;
            writeln!(file, "{}={}", SECRET_KEY, digest.as_hex())?;
            file.sync_all()?;

            // mode() only applies on creation
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&path, fs::Permissions::from_mode(SECRET_FILE_MODE))?;
            }
            Ok(())
        };

        write().map_err(|source| SecretStoreError::FailToWriteSecret {
            path: path.clone(),
            source,
        })
    }

    pub fn remove(&self) -> Result<(), SecretStoreError> {
        let path = self.config.secret_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SecretStoreError::FailToWriteSecret { path, source }),
        }
    }

    /// Return the stored digest, or prompt for a secret, hash and persist it.
    pub fn load_or_prompt<P: SecretPrompt + ?Sized>(
        &self,
        prompt: &mut P,
    ) -> Result<SecretDigest, SecretStoreError> {
        self.ensure_config_dir()?;

        if let Some(digest) = self.read()? {
            log::debug!("loaded secret digest from {}", self.config.secret_path().display());
            return Ok(digest);
        }

        let secret = prompt.prompt("Enter your password: ")?;
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(SecretStoreError::EmptySecret);
        }

        let digest = SecretDigest::from_password(secret);
        self.write(&digest)?;
        log::info!("password saved to {}", self.config.secret_path().display());

        Ok(digest)
    }

    fn ensure_config_dir(&self) -> Result<(), SecretStoreError> {
        let dir = self.config.config_dir();
        if dir.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(CONFIG_DIR_MODE);
        }

        builder
            .create(dir)
            .map_err(|source| SecretStoreError::FailToCreateConfigDir {
                path: dir.to_path_buf(),
                source,
            })
    }
}
