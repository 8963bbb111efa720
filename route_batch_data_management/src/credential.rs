use std::{fmt, path::Path};

use crate::RouteBatchError;

/// Directions service key. The buffer is overwritten when the handle is dropped.
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn read(path: &Path) -> Result<Self, RouteBatchError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RouteBatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let key = Self::new(raw.trim());
        drop(ApiKey(raw));

        if key.0.is_empty() {
            return Err(RouteBatchError::EmptyApiKey(path.to_path_buf()));
        }

        Ok(key)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        // Same allocation, so this overwrites the key bytes in place
        let len = self.0.len();
        self.0.clear();
        self.0.extend(std::iter::repeat_n('\0', len));
        std::hint::black_box(&self.0);
        self.0.clear();
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
