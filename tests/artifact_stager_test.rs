use std::path::PathBuf;

use voxrelay::application::ports::ArtifactStager;
use voxrelay::infrastructure::staging::TempArtifactStager;

fn staged_files(dir: &std::path::Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}

#[tokio::test]
async fn given_raw_bytes_when_staging_then_artifact_holds_the_full_payload() {
    let dir = tempfile::tempdir().unwrap();
    let stager = TempArtifactStager::in_dir(dir.path().to_path_buf());

    let artifact = stager.stage(b"fake audio bytes").await.unwrap();

    assert_eq!(artifact.len(), 16);
    let written = std::fs::read(artifact.path()).unwrap();
    assert_eq!(written, b"fake audio bytes");
}

#[tokio::test]
async fn given_staged_artifact_when_dropped_then_backing_file_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let stager = TempArtifactStager::in_dir(dir.path().to_path_buf());

    let artifact = stager.stage(b"fake audio bytes").await.unwrap();
    let path = artifact.path().to_path_buf();
    assert!(path.exists());

    drop(artifact);

    assert!(!path.exists());
    assert!(staged_files(dir.path()).is_empty());
}

#[tokio::test]
async fn given_two_staged_artifacts_when_staging_then_paths_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    let stager = TempArtifactStager::in_dir(dir.path().to_path_buf());

    let first = stager.stage(b"one").await.unwrap();
    let second = stager.stage(b"two").await.unwrap();

    assert_ne!(first.path(), second.path());
}
