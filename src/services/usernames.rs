use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::extractor::{self, ExportError};
use crate::utils::validation::InputFormat;

/// Parses a headerless CSV where the first column of each row is a username.
///
/// Rows may be ragged; extra columns are ignored. Blank rows are skipped.
/// Values are taken verbatim, without trimming or case folding.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<String>, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut found = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(0) {
            Some(username) if !username.is_empty() => found.push(username.to_string()),
            _ => {}
        }
    }

    Ok(found)
}

pub fn read_csv(path: &Path) -> Result<Vec<String>, ExportError> {
    let file = File::open(path)?;
    parse_csv(file)
}

/// Writes one username per row, no header
pub fn write_csv(path: &Path, usernames: &[String]) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    for username in usernames {
        writer.write_record([username])?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads a list from disk in either format without writing derived files.
/// The format is chosen from the path's extension.
pub fn read_username_list(path: &Path) -> Result<Vec<String>, ExportError> {
    match InputFormat::from_filename(&path.to_string_lossy()) {
        InputFormat::Json => extractor::extract_usernames(&std::fs::read(path)?),
        InputFormat::Csv => read_csv(path),
    }
}

/// Loads a stored upload into a username set.
///
/// JSON uploads go through the extractor first, which leaves the converted
/// CSV beside the source file.
pub fn load_username_set(path: &Path, format: InputFormat) -> Result<HashSet<String>, ExportError> {
    let csv_path: PathBuf = match format {
        InputFormat::Json => extractor::convert_json_to_csv(path)?,
        InputFormat::Csv => path.to_path_buf(),
    };

    Ok(read_csv(&csv_path)?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_per_line() {
        let parsed = parse_csv("alice\nbob\ncarol\n".as_bytes()).unwrap();
        assert_eq!(parsed, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_single_row_is_a_list() {
        assert_eq!(parse_csv("solo".as_bytes()).unwrap(), vec!["solo"]);
        assert_eq!(parse_csv("solo\r\n".as_bytes()).unwrap(), vec!["solo"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("".as_bytes()).unwrap().is_empty());
        assert!(parse_csv("\n\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_values_are_verbatim() {
        let parsed = parse_csv("Alice\nalice\n bob\n\"quoted,name\"\n".as_bytes()).unwrap();
        assert_eq!(parsed, vec!["Alice", "alice", " bob", "quoted,name"]);
    }

    #[test]
    fn test_first_column_of_ragged_rows() {
        let parsed = parse_csv("alice,2024-01-01\nbob\ncarol,x,y\n".as_bytes()).unwrap();
        assert_eq!(parsed, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_invalid_utf8_is_csv_error() {
        let err = parse_csv(&b"alice\n\xff\xfe\n"[..]).unwrap_err();
        assert!(matches!(err, ExportError::Csv(_)));
        assert!(!err.is_io());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.csv");
        let names = vec!["alice".to_string(), "with,comma".to_string()];

        write_csv(&path, &names).unwrap();

        assert_eq!(read_csv(&path).unwrap(), names);
    }

    #[test]
    fn test_json_and_flattened_csv_agree() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("export.json");
        let csv_path = dir.path().join("flat.csv");
        std::fs::write(
            &json_path,
            br#"[{"string_list_data":[{"value":"dave"}]},{"string_list_data":[{"value":"erin"}]}]"#,
        )
        .unwrap();
        std::fs::write(&csv_path, "erin\ndave\n").unwrap();

        let from_json = load_username_set(&json_path, InputFormat::Json).unwrap();
        let from_csv = load_username_set(&csv_path, InputFormat::Csv).unwrap();

        assert_eq!(from_json, from_csv);
        assert!(dir.path().join("export.csv").exists());
    }

    #[test]
    fn test_read_username_list_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("followers_1.json");
        std::fs::write(&json_path, br#"[{"string_list_data":[{"value":"dave"}]}]"#).unwrap();
        let txt_path = dir.path().join("followers.txt");
        std::fs::write(&txt_path, "dave\n").unwrap();

        assert_eq!(read_username_list(&json_path).unwrap(), vec!["dave"]);
        assert_eq!(read_username_list(&txt_path).unwrap(), vec!["dave"]);
        assert!(!dir.path().join("followers_1.csv").exists());
    }

    #[test]
    fn test_duplicates_collapse_in_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dupes.csv");
        std::fs::write(&path, "bob\nbob\nalice\n").unwrap();

        let set = load_username_set(&path, InputFormat::Csv).unwrap();
        assert_eq!(set.len(), 2);
    }
}
