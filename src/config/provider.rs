use std::io;
use std::path::{Path, PathBuf};

use figment::value::{Dict, Map, Value};
use figment::{Error, Metadata, Profile, Provider, Source};

use crate::error::ConfigError;

/// A figment provider for flat `key=value` files.
///
/// Keys and values are trimmed. Blank lines, `#` comments and lines without an
/// `=` are ignored. Values are parsed the same way figment parses environment
/// variables, so `4` becomes a number and `buffered` stays a string.
pub struct KeyValueFile {
    path: PathBuf,
    contents: String,
}

impl KeyValueFile {
    /// Read the file up front so a missing file is reported before merging.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Self { path, contents }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(ConfigError::FileNotFound { path })
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_contents(contents: &str) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            contents: contents.to_owned(),
        }
    }

    /// The `(key, raw value)` pairs in file order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.contents.lines().filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then_some((key, value.trim()))
        })
    }
}

impl Provider for KeyValueFile {
    fn metadata(&self) -> Metadata {
        Metadata::named("key=value file").source(Source::File(self.path.clone()))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (key, raw) in self.entries() {
            let value = raw
                .parse::<Value>()
                .unwrap_or_else(|_| Value::from(raw.to_owned()));
            // Later lines win, like a shell sourcing the file
            dict.insert(key.to_owned(), value);
        }

        let mut data = Map::new();
        data.insert(Profile::Default, dict);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_skip_noise() {
        let file = KeyValueFile::from_contents(
            "# workers\nthreads = 4\n\n   \nnot a pair\nlimit=20\n=orphan\ncolor=blue\n",
        );
        let entries: Vec<_> = file.entries().collect();
        assert_eq!(entries, vec![("threads", "4"), ("limit", "20"), ("color", "blue")]);
    }

    #[test]
    fn test_values_are_typed() {
        let data = KeyValueFile::from_contents("threads=4\nstrategy=buffered\nthreads=6\n")
            .data()
            .unwrap();
        let dict = &data[&Profile::Default];

        assert_eq!(dict["threads"].to_i128(), Some(6));
        assert_eq!(dict["strategy"].as_str(), Some("buffered"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        assert!(matches!(
            KeyValueFile::open(&path),
            Err(ConfigError::FileNotFound { path: p }) if p == path
        ));
    }

    #[test]
    fn test_open_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        std::fs::write(&path, "threads=2\n").unwrap();

        let file = KeyValueFile::open(&path).unwrap();
        assert_eq!(file.entries().collect::<Vec<_>>(), vec![("threads", "2")]);
        assert_eq!(file.metadata().source, Some(Source::File(path)));
    }
}
