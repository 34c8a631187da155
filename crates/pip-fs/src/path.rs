//! Normalized path handling for project files

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Project XML paths come from configuration files written on any platform,
/// so separators are normalized on the way in and converted back to the
/// native form only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Whether the path is absolute (`/…` or a drive prefix such as `C:/…`).
    pub fn is_absolute(&self) -> bool {
        let bytes = self.inner.as_bytes();
        self.inner.starts_with('/')
            || (bytes.len() >= 3 && bytes[1] == b':' && bytes[2] == b'/')
    }

    /// Resolve a relative path against `base`; absolute paths are returned as is.
    pub fn resolve_against(&self, base: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            base.join(self.inner.trim_start_matches("./"))
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn backslashes_are_normalized() {
        let path = NormalizedPath::new("com.example\\xml\\packageInstallationPlugin.xml");
        assert_eq!(path.as_str(), "com.example/xml/packageInstallationPlugin.xml");
    }

    #[rstest]
    #[case("/srv/package", "pip.xml", "/srv/package/pip.xml")]
    #[case("/srv/package/", "pip.xml", "/srv/package/pip.xml")]
    #[case("/srv/package", "./xml/pip.xml", "/srv/package/xml/pip.xml")]
    #[case("/srv/package", "/abs/pip.xml", "/abs/pip.xml")]
    #[case("/srv/package", "C:/pkg/pip.xml", "C:/pkg/pip.xml")]
    fn resolve_against_base(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        let resolved = NormalizedPath::new(path).resolve_against(&NormalizedPath::new(base));
        assert_eq!(resolved.as_str(), expected);
    }

    #[test]
    fn parent_and_file_name() {
        let path = NormalizedPath::new("/srv/package/pip.xml");
        assert_eq!(path.parent().unwrap().as_str(), "/srv/package");
        assert_eq!(path.file_name(), Some("pip.xml"));
        assert_eq!(path.extension(), Some("xml"));
        assert_eq!(NormalizedPath::new("/pip.xml").parent().unwrap().as_str(), "/");
        assert_eq!(NormalizedPath::new("pip.xml").parent(), None);
    }

    #[test]
    fn hidden_file_has_no_extension() {
        assert_eq!(NormalizedPath::new("/srv/.pipsync").extension(), None);
    }
}
