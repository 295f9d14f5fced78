//! Repository layout checks
//!
//! Decides whether a parsed tag refers to a container the repository
//! actually contains.

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::domain::tag::{check_version_prefix, follows_semver_guideline, split_namespace};
use crate::domain::ContainerRef;
use crate::error::{InvalidTag, TagError};

/// Where container directories live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryLayout {
    /// `<root>/<dockerfiles_dir>/<container>/` (build path)
    Dockerfiles { root: PathBuf, dockerfiles_dir: PathBuf },
    /// `<root>/<namespace>/<container>/` (mirror path)
    Namespaced { root: PathBuf },
}

impl RepositoryLayout {
    pub fn dockerfiles(root: impl Into<PathBuf>, dockerfiles_dir: impl Into<PathBuf>) -> Self {
        Self::Dockerfiles {
            root: root.into(),
            dockerfiles_dir: dockerfiles_dir.into(),
        }
    }

    pub fn namespaced(root: impl Into<PathBuf>) -> Self {
        Self::Namespaced { root: root.into() }
    }

    /// Build context directory for `container`
    pub fn container_dir(&self, container: &str) -> Result<PathBuf, TagError> {
        match self {
            Self::Dockerfiles {
                root,
                dockerfiles_dir,
            } => Ok(root.join(dockerfiles_dir).join(container)),
            Self::Namespaced { root } => {
                let (namespace, name) = split_namespace(container)?;
                Ok(root.join(namespace).join(name))
            }
        }
    }

    /// Reject tags whose container has no directory or whose version lacks
    /// the `v` prefix; warn on versions that stray from semver
    pub fn check_if_tag_valid(&self, container: &ContainerRef) -> Result<(), TagError> {
        let (parent, name) = match self {
            Self::Dockerfiles {
                root,
                dockerfiles_dir,
            } => (root.join(dockerfiles_dir), container.name.as_str()),
            Self::Namespaced { root } => {
                let (namespace, name) = split_namespace(&container.name)?;
                (root.join(namespace), name)
            }
        };

        let subdirectories = immediate_subdirectories(&parent)?;
        if !subdirectories.iter().any(|d| d == name) {
            return Err(InvalidTag::UnknownContainer {
                container: name.to_string(),
                dir: parent,
            }
            .into());
        }

        check_version_prefix(&container.version)?;

        if !follows_semver_guideline(&container.version) {
            warn!(
                "{}: please follow semantic versioning guidelines",
                container
            );
        }

        Ok(())
    }
}

/// Names of the directories directly inside `dir`
pub fn immediate_subdirectories(dir: &Path) -> Result<Vec<String>, TagError> {
    let layout_error = |source: std::io::Error| TagError::Layout {
        path: dir.to_path_buf(),
        source,
    };

    let mut directories = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(layout_error)? {
        let entry = entry.map_err(layout_error)?;
        if entry.path().is_dir() {
            directories.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    directories.sort();
    Ok(directories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn build_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dockerfiles/samtools")).unwrap();
        fs::create_dir_all(dir.path().join("dockerfiles/bwa")).unwrap();
        fs::write(dir.path().join("dockerfiles/README.md"), "docs").unwrap();
        dir
    }

    #[test]
    fn test_subdirectories_skip_files() {
        let repo = build_repo();
        let dirs = immediate_subdirectories(&repo.path().join("dockerfiles")).unwrap();
        assert_eq!(dirs, vec!["bwa", "samtools"]);
    }

    #[test]
    fn test_build_layout_accepts_known_container() {
        let repo = build_repo();
        let layout = RepositoryLayout::dockerfiles(repo.path(), "dockerfiles");
        assert!(layout
            .check_if_tag_valid(&ContainerRef::new("samtools", "v1.9"))
            .is_ok());
        assert_eq!(
            layout.container_dir("samtools").unwrap(),
            repo.path().join("dockerfiles/samtools")
        );
    }

    #[test]
    fn test_build_layout_rejects_unknown_container() {
        let repo = build_repo();
        let layout = RepositoryLayout::dockerfiles(repo.path(), "dockerfiles");
        let err = layout
            .check_if_tag_valid(&ContainerRef::new("README.md", "v1"))
            .unwrap_err();
        assert!(matches!(
            err,
            TagError::Invalid(InvalidTag::UnknownContainer { container, .. }) if container == "README.md"
        ));
    }

    #[test]
    fn test_rejects_version_without_v() {
        let repo = build_repo();
        let layout = RepositoryLayout::dockerfiles(repo.path(), "dockerfiles");
        let err = layout
            .check_if_tag_valid(&ContainerRef::new("bwa", "0.7.17"))
            .unwrap_err();
        assert!(matches!(
            err,
            TagError::Invalid(InvalidTag::VersionPrefix { .. })
        ));
    }

    #[test]
    fn test_semver_deviation_is_not_fatal() {
        let repo = build_repo();
        let layout = RepositoryLayout::dockerfiles(repo.path(), "dockerfiles");
        assert!(layout
            .check_if_tag_valid(&ContainerRef::new("bwa", "v0.7.17.4"))
            .is_ok());
    }

    #[test]
    fn test_missing_dockerfiles_dir_is_layout_error() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RepositoryLayout::dockerfiles(dir.path(), "dockerfiles");
        let err = layout
            .check_if_tag_valid(&ContainerRef::new("bwa", "v1"))
            .unwrap_err();
        assert!(matches!(err, TagError::Layout { .. }));
    }

    #[test]
    fn test_namespaced_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("biocontainers/bwa")).unwrap();
        let layout = RepositoryLayout::namespaced(dir.path());

        assert!(layout
            .check_if_tag_valid(&ContainerRef::new("biocontainers/bwa", "v0.0.1"))
            .is_ok());
        assert!(matches!(
            layout.check_if_tag_valid(&ContainerRef::new("biocontainers/bowtie", "v1")),
            Err(TagError::Invalid(InvalidTag::UnknownContainer { .. }))
        ));
        assert!(matches!(
            layout.check_if_tag_valid(&ContainerRef::new("bwa", "v0.0.1")),
            Err(TagError::MalformedNamespace { .. })
        ));
    }
}
