//! Read, decode, render and write one shader header

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::{ShaderManifest, TranscodeConfig};
use crate::decode::decode_words;
use crate::error::{TranscodeError, TranscodeResult};
use crate::render::render_header;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeReport {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub word_count: usize,
    /// Value of the generated size constant
    pub byte_size: usize,
    pub dropped_bytes: usize,
}

impl TranscodeReport {
    /// One-line human readable confirmation, e.g. `Generated vector_multiply.hpp`
    pub fn confirmation(&self) -> String {
        let name = self
            .destination_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.destination_path.display().to_string());
        format!("Generated {name}")
    }
}

/// Embeds a SPIR-V module into a C++ header
pub struct Transcoder {
    config: TranscodeConfig,
}

impl Transcoder {
    pub fn new(config: TranscodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranscodeConfig {
        &self.config
    }

    /// Regenerate the destination header from the source module
    pub fn run(&self) -> TranscodeResult<TranscodeReport> {
        let config = &self.config;
        config.validate()?;

        debug!(path = %config.source_path.display(), "reading shader module");
        let bytes = fs::read(&config.source_path).map_err(|source| TranscodeError::SourceRead {
            path: config.source_path.clone(),
            source,
        })?;

        let words = decode_words(&bytes);
        if words.dropped_bytes() > 0 {
            warn!(
                path = %config.source_path.display(),
                length = bytes.len(),
                dropped = words.dropped_bytes(),
                "module length is not a multiple of 4, trailing bytes dropped"
            );
        }

        let header = render_header(words.as_slice(), config);

        debug!(path = %config.destination_path.display(), words = words.len(), "writing header");
        write_atomic(&config.destination_path, header.as_bytes()).map_err(|source| {
            TranscodeError::DestinationWrite {
                path: config.destination_path.clone(),
                source,
            }
        })?;

        let report = TranscodeReport {
            source_path: config.source_path.clone(),
            destination_path: config.destination_path.clone(),
            word_count: words.len(),
            byte_size: words.byte_len(),
            dropped_bytes: words.dropped_bytes(),
        };
        debug!(
            array = %config.array_name,
            words = report.word_count,
            bytes = report.byte_size,
            "header generated"
        );
        Ok(report)
    }
}

/// Run a single transcode with the given config
pub fn transcode(config: TranscodeConfig) -> TranscodeResult<TranscodeReport> {
    Transcoder::new(config).run()
}

/// Decode and render in memory, without touching the filesystem
pub fn transcode_bytes(bytes: &[u8], config: &TranscodeConfig) -> String {
    let words = decode_words(bytes);
    render_header(words.as_slice(), config)
}

/// Regenerate every header in a manifest, stopping at the first failure
pub fn transcode_manifest(manifest: &ShaderManifest) -> TranscodeResult<Vec<TranscodeReport>> {
    manifest
        .shaders
        .iter()
        .map(|config| Transcoder::new(config.clone()).run())
        .collect()
}

/// Write through a temporary file in the destination directory and rename it
/// into place, so a failed run never leaves a truncated header behind.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let existing = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;

    // Temp files are created 0600; keep the header's mode instead.
    if let Some(permissions) = existing.or_else(new_header_permissions) {
        file.as_file().set_permissions(permissions)?;
    }

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn new_header_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_header_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> TranscodeConfig {
        TranscodeConfig {
            source_path: dir.join("vector_multiply.spv"),
            destination_path: dir.join("vector_multiply.hpp"),
            ..Default::default()
        }
    }

    #[test]
    fn test_run_writes_header() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.source_path, [1, 0, 0, 0, 2, 0, 0, 0]).unwrap();

        let report = transcode(config.clone()).unwrap();
        assert_eq!(report.word_count, 2);
        assert_eq!(report.byte_size, 8);
        assert_eq!(report.dropped_bytes, 0);
        assert_eq!(report.confirmation(), "Generated vector_multiply.hpp");

        let header = fs::read_to_string(&config.destination_path).unwrap();
        assert!(header.contains("    0x00000001, 0x00000002,\n"));
    }

    #[test]
    fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let err = transcode(config.clone()).unwrap_err();
        assert!(matches!(err, TranscodeError::SourceRead { .. }));
        assert!(!config.destination_path.exists());
    }

    #[test]
    fn test_missing_destination_dir_not_created() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.destination_path = dir.path().join("missing").join("out.hpp");
        fs::write(&config.source_path, [0u8; 4]).unwrap();

        let err = transcode(config.clone()).unwrap_err();
        assert!(matches!(err, TranscodeError::DestinationWrite { .. }));
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_invalid_config_rejected_before_io() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.array_name = "not valid".to_string();

        let err = transcode(config).unwrap_err();
        assert!(matches!(err, TranscodeError::InvalidConfig(_)));
    }

    #[test]
    fn test_overwrites_existing_header() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.source_path, [7, 0, 0, 0]).unwrap();
        fs::write(&config.destination_path, "stale contents, longer than the new header").unwrap();

        transcode(config.clone()).unwrap();
        let header = fs::read_to_string(&config.destination_path).unwrap();
        assert!(!header.contains("stale"));
        assert!(header.contains("0x00000007,"));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.source_path, [0u8; 16]).unwrap();

        transcode(config).unwrap();
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_header_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.source_path, [0u8; 4]).unwrap();

        transcode(config.clone()).unwrap();
        let mode = fs::metadata(&config.destination_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_header_mode_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.source_path, [0u8; 4]).unwrap();
        fs::write(&config.destination_path, "old").unwrap();
        fs::set_permissions(&config.destination_path, fs::Permissions::from_mode(0o664)).unwrap();

        transcode(config.clone()).unwrap();
        let mode = fs::metadata(&config.destination_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
        assert_ne!(fs::read_to_string(&config.destination_path).unwrap(), "old");
    }

    #[test]
    fn test_transcode_bytes_matches_run() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let bytes = [3u8, 2, 35, 7, 0, 0, 1, 0, 9];
        fs::write(&config.source_path, bytes).unwrap();

        let report = transcode(config.clone()).unwrap();
        assert_eq!(report.dropped_bytes, 1);

        let on_disk = fs::read_to_string(&config.destination_path).unwrap();
        assert_eq!(on_disk, transcode_bytes(&bytes, &config));
    }

    #[test]
    fn test_manifest_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let first = config_in(dir.path());
        fs::write(&first.source_path, [0u8; 4]).unwrap();

        let second = TranscodeConfig {
            source_path: dir.path().join("absent.spv"),
            destination_path: dir.path().join("absent.hpp"),
            ..TranscodeConfig::for_shader("absent")
        };
        let third = TranscodeConfig {
            source_path: first.source_path.clone(),
            destination_path: dir.path().join("third.hpp"),
            ..TranscodeConfig::for_shader("third")
        };

        let manifest = ShaderManifest {
            shaders: vec![first.clone(), second, third],
        };
        let err = transcode_manifest(&manifest).unwrap_err();
        assert!(matches!(err, TranscodeError::SourceRead { .. }));
        assert!(first.destination_path.exists());
        assert!(!dir.path().join("third.hpp").exists());
    }
}
