//! Источники исходного текста.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GraphError, GraphResult};

/// Поставщик исходного текста программы.
pub trait SourceProvider {
    /// Вернуть текст дословно, вместе с заголовком, если он есть.
    fn read_source(&self) -> GraphResult<String>;
}

impl SourceProvider for str {
    fn read_source(&self) -> GraphResult<String> {
        Ok(self.to_string())
    }
}

impl SourceProvider for String {
    fn read_source(&self) -> GraphResult<String> {
        Ok(self.clone())
    }
}

impl<T: SourceProvider + ?Sized> SourceProvider for &T {
    fn read_source(&self) -> GraphResult<String> {
        (**self).read_source()
    }
}

/// Программа, хранящаяся в файле (UTF-8).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceProvider for FileSource {
    fn read_source(&self) -> GraphResult<String> {
        fs::read_to_string(&self.path)
            .map_err(|e| GraphError::IoError(format!("{}: {}", self.path.display(), e)))
    }
}
