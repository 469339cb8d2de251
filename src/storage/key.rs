use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{ContentError, Result};

/// Identifies one stored blob: `object_id/filename`.
///
/// The rendered string is both the RPC key and the ring hash input; the components map
/// onto `<root>/<object_id>/<filename>` on disk. Construction validates that the key
/// cannot escape a storage root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    object_id: String,
    filename: String,
}

impl ObjectKey {
    pub fn new(object_id: impl Into<String>, filename: impl Into<String>) -> Result<Self> {
        let key = Self {
            object_id: object_id.into(),
            filename: filename.into(),
        };
        key.validate()?;
        Ok(key)
    }

    /// Splits `object_id/filename` on the first `/`; the filename may contain more.
    pub fn parse(key: &str) -> Result<Self> {
        let (object_id, filename) = key.split_once('/').ok_or(ContentError::InvalidKey {
            key: key.to_string(),
            reason: "missing '/' between object id and filename",
        })?;
        Self::new(object_id, filename)
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Path of the blob relative to a storage root.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(&self.object_id);
        path.extend(self.filename.split('/'));
        path
    }

    fn validate(&self) -> Result<()> {
        let reason = if self.object_id.is_empty() {
            Some("empty object id")
        } else if self.object_id.contains('/') {
            Some("object id contains '/'")
        } else if self.object_id.starts_with('.') {
            Some("object id starts with '.'")
        } else if self.filename.is_empty() {
            Some("empty filename")
        } else if self
            .filename
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            Some("filename has an empty, '.' or '..' segment")
        } else if [&self.object_id, &self.filename]
            .iter()
            .any(|part| part.contains('\\') || part.contains('\0'))
        {
            Some("key contains a backslash or NUL byte")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ContentError::InvalidKey {
                key: self.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.object_id, self.filename)
    }
}

impl FromStr for ObjectKey {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
