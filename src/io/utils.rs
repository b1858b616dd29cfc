//! Utilities for input/output.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

/// Writes the given text to the file at the given path, creating any missing parent directories.
pub fn write_text_file(text: &str, file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = io::BufWriter::new(fs::File::create(file_path)?);
    file.write_all(text.as_bytes())?;
    file.flush()
}

/// Serializes the given data into JSON format and saves it at the given path.
#[cfg(feature = "json")]
pub fn save_data_as_json<T: serde::Serialize>(file_path: &Path, data: &T) -> io::Result<()> {
    let text = serde_json::to_string_pretty(data).map_err(io::Error::from)?;
    write_text_file(&text, file_path)
}

/// Serializes the given data into JSON format and writes it to standard output.
#[cfg(feature = "json")]
pub fn print_data_as_json<T: serde::Serialize>(data: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, data).map_err(io::Error::from)?;
    writeln!(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writing_text_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("nested").join("out.txt");
        write_text_file("structure", &file_path).unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "structure");
    }
}
