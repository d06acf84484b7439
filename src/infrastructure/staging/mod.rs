mod temp_artifact_stager;

pub use temp_artifact_stager::TempArtifactStager;
