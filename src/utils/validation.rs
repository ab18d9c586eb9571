use std::fmt;
use std::path::Path;

/// On-disk format of an uploaded username list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Platform export in one of the two recognized JSON shapes
    Json,
    /// One username per row, no header
    Csv,
}

impl InputFormat {
    /// Detects the format from a client-supplied filename.
    ///
    /// Only the final path component is looked at, so a name such as
    /// `../../etc/followers.json` is still just a JSON upload. Anything that
    /// does not carry a `.json` extension is treated as CSV.
    pub fn from_filename(filename: &str) -> Self {
        let name = filename.rsplit(['/', '\\']).next().unwrap_or("");

        match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
