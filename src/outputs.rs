//! Named output values for downstream workflow steps

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub const OLD_TAG_OUTPUT: &str = "old-tag";
pub const NEW_TAG_OUTPUT: &str = "new-tag";

/// Destination for named step outputs
pub trait OutputSink {
    fn set(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Appends `name=value` lines to the file GitHub Actions names in `GITHUB_OUTPUT`
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GithubOutputFile { path: path.into() }
    }

    /// Output file from the `GITHUB_OUTPUT` environment variable, if set
    pub fn from_env() -> Option<Self> {
        std::env::var_os("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map(GithubOutputFile::new)
    }
}

impl OutputSink for GithubOutputFile {
    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}={}", name, value)?;
        Ok(())
    }
}

/// Prints the legacy `::set-output` workflow command
pub struct StdoutOutputs;

impl OutputSink for StdoutOutputs {
    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        println!();
        println!("::set-output name={}::{}", name, value);
        Ok(())
    }
}

/// Keeps outputs in memory
#[derive(Debug, Default)]
pub struct MemoryOutputs {
    pub values: BTreeMap<String, String>,
}

impl MemoryOutputs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl OutputSink for MemoryOutputs {
    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Output sink for the current process: the `GITHUB_OUTPUT` file when present
pub fn default_sink() -> Box<dyn OutputSink> {
    match GithubOutputFile::from_env() {
        Some(file) => Box::new(file),
        None => Box::new(StdoutOutputs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::NamedTempFile;

    #[test]
    fn test_output_file_appends_lines() {
        let file = NamedTempFile::new().unwrap();
        let mut sink = GithubOutputFile::new(file.path());

        sink.set(OLD_TAG_OUTPUT, "v1.1.0").unwrap();
        sink.set(NEW_TAG_OUTPUT, "v1.1.1").unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, "old-tag=v1.1.0\nnew-tag=v1.1.1\n");
    }

    #[test]
    fn test_memory_outputs() {
        let mut sink = MemoryOutputs::default();
        sink.set(NEW_TAG_OUTPUT, "v2.0.0").unwrap();
        assert_eq!(sink.get(NEW_TAG_OUTPUT), Some("v2.0.0"));
        assert_eq!(sink.get(OLD_TAG_OUTPUT), None);
    }

    #[test]
    #[serial]
    fn test_output_file_from_env() {
        let file = NamedTempFile::new().unwrap();
        std::env::set_var("GITHUB_OUTPUT", file.path());
        let sink = GithubOutputFile::from_env();
        std::env::remove_var("GITHUB_OUTPUT");

        assert_eq!(sink.map(|s| s.path), Some(file.path().to_path_buf()));
    }

    #[test]
    #[serial]
    fn test_no_output_file_without_env() {
        std::env::remove_var("GITHUB_OUTPUT");
        assert!(GithubOutputFile::from_env().is_none());
    }
}
