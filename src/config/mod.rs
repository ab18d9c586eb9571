use std::env;
use std::path::PathBuf;

/// Runtime configuration for the comparison service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind (default: "0.0.0.0")
    pub host: String,

    /// Listening port (default: 5000)
    pub port: u16,

    /// Scratch root for uploaded exports (default: "uploads")
    pub upload_dir: PathBuf,

    /// Maximum request body size in bytes (default: 256 MB)
    pub max_upload_size: usize,

    /// Leave per-request scratch directories on disk (default: false)
    pub keep_scratch_files: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            max_upload_size: 256 * 1024 * 1024, // 256 MB
            keep_scratch_files: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(default.host),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            upload_dir: env::var("UPLOAD_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            keep_scratch_files: env::var("KEEP_SCRATCH_FILES")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(default.keep_scratch_files),
        }
    }

    /// Create config for development (scratch files are kept for inspection)
    pub fn development() -> Self {
        Self {
            keep_scratch_files: true,
            ..Self::default()
        }
    }

    pub fn with_upload_dir(mut self, upload_dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = upload_dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_size, 256 * 1024 * 1024);
        assert!(!config.keep_scratch_files);
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development();
        assert!(config.keep_scratch_files);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_from_env_port_override() {
        unsafe { env::set_var("PORT", "8088") };
        let config = AppConfig::from_env();
        unsafe { env::remove_var("PORT") };
        assert_eq!(config.port, 8088);
    }

    #[test]
    fn test_with_upload_dir() {
        let config = AppConfig::default().with_upload_dir("/tmp/scratch");
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/scratch"));
    }
}
