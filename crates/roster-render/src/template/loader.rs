//! File-based template resolution.
//!
//! Views are named by their path relative to a template directory, without
//! extension: with a directory `./templates`, the view `www/collection/index`
//! resolves to `./templates/www/collection/index.jinja` (or one of the other
//! recognized extensions).
//!
//! # Extension Priority
//!
//! | Priority | Extension |
//! |----------|-----------|
//! | 1 (highest) | `.jinja` |
//! | 2 | `.jinja2` |
//! | 3 | `.j2` |
//! | 4 | `.html` |
//! | 5 (lowest) | `.txt` |
//!
//! A name that already carries an extension is looked up as-is first.
//! Directories are searched in registration order; the first hit wins.

use std::path::{Component, Path, PathBuf};

/// Recognized template file extensions in priority order.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2", ".html", ".txt"];

/// Resolves view names to files across a list of directories.
#[derive(Debug, Clone, Default)]
pub struct DirLoader {
    dirs: Vec<PathBuf>,
}

impl DirLoader {
    /// Creates a loader with no directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directory to the search path.
    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    /// Returns the registered directories.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Finds the file backing `name`, if any.
    ///
    /// Names that try to escape the directory (`..`, absolute paths) never
    /// resolve.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if !is_relative_name(name) {
            return None;
        }

        self.dirs.iter().find_map(|dir| {
            let exact = dir.join(name);
            if exact.is_file() {
                return Some(exact);
            }
            TEMPLATE_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}{}", name, ext)))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Reads the source for `name`, returning `Ok(None)` when nothing matches.
    pub fn load(&self, name: &str) -> std::io::Result<Option<String>> {
        match self.resolve(name) {
            Some(path) => std::fs::read_to_string(path).map(Some),
            None => Ok(None),
        }
    }
}

fn is_relative_name(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_resolves_without_extension() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "www/collection/index.jinja", "index");

        let mut loader = DirLoader::new();
        loader.push(tmp.path());

        assert_eq!(
            loader.load("www/collection/index").unwrap(),
            Some("index".to_string())
        );
    }

    #[test]
    fn test_extension_priority() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "item.txt", "txt");
        write(tmp.path(), "item.j2", "j2");

        let mut loader = DirLoader::new();
        loader.push(tmp.path());

        assert_eq!(loader.load("item").unwrap(), Some("j2".to_string()));
        assert_eq!(loader.load("item.txt").unwrap(), Some("txt".to_string()));
    }

    #[test]
    fn test_first_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write(first.path(), "empty.html", "first");
        write(second.path(), "empty.html", "second");

        let mut loader = DirLoader::new();
        loader.push(first.path());
        loader.push(second.path());

        assert_eq!(loader.load("empty").unwrap(), Some("first".to_string()));
    }

    #[test]
    fn test_rejects_escaping_names() {
        let tmp = TempDir::new().unwrap();
        let mut loader = DirLoader::new();
        loader.push(tmp.path().join("inner"));
        write(tmp.path(), "secret.txt", "nope");

        assert_eq!(loader.resolve("../secret"), None);
        assert_eq!(loader.resolve(""), None);
    }

    #[test]
    fn test_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        let mut loader = DirLoader::new();
        loader.push(tmp.path());
        assert_eq!(loader.load("www/index").unwrap(), None);
    }
}
