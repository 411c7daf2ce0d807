//! Locating the API key.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::errors::LlmError;

/// Location of the key file relative to the home directory.
pub const KEY_FILE: &str = ".config/llm/key";

/// An API key. The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

/// Resolves a [`Credential`] from an explicit key, or from the key file
/// under the home directory.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    api_key: Option<String>,
    home: Option<PathBuf>,
}

impl CredentialResolver {
    pub fn new(api_key: Option<String>, home: Option<PathBuf>) -> Self {
        Self { api_key, home }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.api_key.clone(), cfg.home.clone())
    }

    /// A non-empty `API_KEY` wins and the filesystem is never touched.
    pub fn resolve(&self) -> Result<Credential, LlmError> {
        if let Some(key) = self.api_key.as_deref().filter(|key| !key.is_empty()) {
            debug!(source = "env", "using API key from API_KEY");
            return Ok(Credential::new(key));
        }

        let home = self.home.as_ref().ok_or(LlmError::HomeDirUnavailable)?;
        let path = home.join(KEY_FILE);
        debug!(source = "file", path = %path.display(), "reading API key file");
        let key = read_key_file(&path).map_err(|source| LlmError::KeyFileUnreadable {
            path: path.clone(),
            source,
        })?;
        Ok(Credential::new(key))
    }
}

/// Read the whole key file, byte for byte. The handle is closed when `reader`
/// goes out of scope, whether or not the read succeeded.
fn read_key_file(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut key = Vec::new();
    reader.read_to_end(&mut key)?;
    String::from_utf8(key).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
