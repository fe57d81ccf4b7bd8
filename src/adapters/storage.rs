use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// File-backed storage; a missing path means stdin or stdout.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl LocalStorage {
    pub fn new(input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        Self { input, output }
    }
}

impl Storage for LocalStorage {
    fn open_input(&self) -> Result<Box<dyn BufRead>> {
        match &self.input {
            Some(path) => {
                tracing::debug!("Reading input from {}", path.display());
                Ok(Box::new(BufReader::new(fs::File::open(path)?)))
            }
            None => {
                tracing::debug!("Reading input from stdin");
                Ok(Box::new(std::io::stdin().lock()))
            }
        }
    }

    fn write_output(&self, data: &[u8]) -> Result<()> {
        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, data)?;
            }
            None => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                out.write_all(data)?;
                out.flush()?;
            }
        }
        Ok(())
    }

    fn describe_output(&self) -> String {
        self.output
            .as_deref()
            .map(Path::display)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "stdout".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("nested/out.csv");
        fs::write(&input, b"h\nrow").unwrap();

        let storage = LocalStorage::new(Some(input), Some(output.clone()));
        let mut content = Vec::new();
        storage.open_input().unwrap().read_to_end(&mut content).unwrap();
        assert_eq!(content, b"h\nrow");

        storage.write_output(b"cleaned").unwrap();
        assert_eq!(fs::read(&output).unwrap(), b"cleaned");
        assert!(storage.describe_output().ends_with("out.csv"));
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(Some(dir.path().join("absent.csv")), None);
        assert!(matches!(
            storage.open_input(),
            Err(crate::utils::error::EtlError::IoError(_))
        ));
        assert_eq!(storage.describe_output(), "stdout");
    }
}
