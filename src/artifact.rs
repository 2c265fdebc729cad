//! Build artifact archiving and release-asset upload.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use octocrab::Octocrab;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::ArtifactError;

/// An artifact uploaded to the draft release.
#[derive(Debug, Clone)]
pub struct AttachedArtifact {
    pub name: String,
    pub sha256: String,
}

/// Archive the artifact path if needed and upload it as a release asset.
///
/// Paths that already name an archive are uploaded as-is; directories and
/// bare files are packed into a gzip-compressed tarball first.
pub async fn attach(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    path: &Path,
    release_id: u64,
) -> Result<AttachedArtifact, ArtifactError> {
    let staging = tempfile::tempdir().map_err(ArtifactError::ArchiveFailed)?;
    let (archive_path, name) = prepare_archive(path, staging.path())?;

    let sha256 = compute_sha256(&archive_path)?;

    let data = std::fs::read(&archive_path).map_err(ArtifactError::ReadFailed)?;

    let asset = octocrab
        .repos(owner, repo)
        .releases()
        .upload_asset(release_id, &name, data.into())
        .send()
        .await
        .map_err(|e| ArtifactError::UploadFailed(Box::new(e)))?;

    if asset.state != "uploaded" {
        return Err(ArtifactError::NotUploaded(asset.state));
    }

    info!(asset = %name, "Artifact attached to draft release");

    Ok(AttachedArtifact { name, sha256 })
}

/// Resolve the file to upload: the path itself when it already names an
/// archive, otherwise a freshly packed tarball in the staging directory.
fn prepare_archive(path: &Path, staging: &Path) -> Result<(PathBuf, String), ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::PathNotFound(path.display().to_string()));
    }

    let base_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "artifact".to_string());

    if is_prearchived(&base_name) {
        return Ok((path.to_path_buf(), base_name));
    }

    let archive_name = format!("{base_name}.tar.gz");
    let archive_path = staging.join(&archive_name);
    create_tarball(path, &archive_path)?;

    Ok((archive_path, archive_name))
}

fn is_prearchived(name: &str) -> bool {
    name.ends_with(".zip") || name.ends_with(".tar.gz") || name.ends_with(".tgz")
}

/// Pack a file or directory into a gzip-compressed tarball.
fn create_tarball(source: &Path, output: &Path) -> Result<(), ArtifactError> {
    let file = File::create(output).map_err(ArtifactError::ArchiveFailed)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = tar::Builder::new(encoder);

    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "artifact".to_string());

    if source.is_dir() {
        archive
            .append_dir_all(&name, source)
            .map_err(ArtifactError::ArchiveFailed)?;
    } else {
        archive
            .append_path_with_name(source, &name)
            .map_err(ArtifactError::ArchiveFailed)?;
    }

    archive.finish().map_err(ArtifactError::ArchiveFailed)?;

    Ok(())
}

/// SHA-256 of a file, streamed.
fn compute_sha256(path: &Path) -> Result<String, ArtifactError> {
    let file = File::open(path).map_err(ArtifactError::ReadFailed)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(ArtifactError::ReadFailed)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hash = hasher.finalize();
    Ok(format!("{hash:x}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_an_error() {
        let staging = tempfile::tempdir().unwrap();
        let result = prepare_archive(Path::new("/nonexistent/build"), staging.path());
        assert!(matches!(result, Err(ArtifactError::PathNotFound(_))));
    }

    #[test]
    fn test_prearchived_path_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let zip = dir.path().join("dist.zip");
        std::fs::write(&zip, b"not really a zip").unwrap();

        let staging = tempfile::tempdir().unwrap();
        let (archive_path, name) = prepare_archive(&zip, staging.path()).unwrap();

        assert_eq!(archive_path, zip);
        assert_eq!(name, "dist.zip");
    }

    #[test]
    fn test_directory_is_packed_into_tarball() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("dist");
        std::fs::create_dir(&build).unwrap();
        std::fs::write(build.join("app.js"), "console.log('hi')").unwrap();

        let staging = tempfile::tempdir().unwrap();
        let (archive_path, name) = prepare_archive(&build, staging.path()).unwrap();

        assert_eq!(name, "dist.tar.gz");
        assert!(archive_path.exists());
        assert!(archive_path.starts_with(staging.path()));
    }

    #[test]
    fn test_bare_file_is_packed_into_tarball() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("app");
        std::fs::write(&binary, b"\x7fELF").unwrap();

        let staging = tempfile::tempdir().unwrap();
        let (_, name) = prepare_archive(&binary, staging.path()).unwrap();

        assert_eq!(name, "app.tar.gz");
    }

    #[test]
    fn test_compute_sha256_known_value() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.txt");
        std::fs::write(&file, "hello world").unwrap();

        let hash = compute_sha256(&file).unwrap();
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }
}
