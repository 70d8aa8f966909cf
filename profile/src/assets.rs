use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ProfileError, Result};

/// Images the game draws, relative to the asset root
pub const STANDARD_IMAGES: [&str; 7] = [
    "Images/background.png",
    "Images/bird.png",
    "Images/start_button.png",
    "Images/exit_button.png",
    "Images/tube.png",
    "Images/tube_mouth.png",
    "Images/title.png",
];

/// Asset files that must exist before the game starts
#[derive(Debug, Clone)]
pub struct AssetManifest {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl AssetManifest {
    pub fn new(
        root: impl Into<PathBuf>,
        files: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        Self {
            root: root.into(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn standard(root: impl Into<PathBuf>) -> Self {
        Self::new(root, STANDARD_IMAGES)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of every listed file
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.files.iter().map(|file| self.root.join(file))
    }

    pub fn missing(&self) -> Vec<PathBuf> {
        self.paths().filter(|path| !path.is_file()).collect()
    }

    /// Fail on the first listed file that doesn't exist
    pub fn verify(&self) -> Result<()> {
        if let Some(path) = self.paths().find(|path| !path.is_file()) {
            return Err(ProfileError::MissingAsset(path));
        }
        info!("found {} assets under {}", self.files.len(), self.root.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn populate(dir: &Path, files: &[&str]) {
        for file in files {
            let path = dir.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"png").unwrap();
        }
    }

    #[test]
    fn test_complete_asset_tree_passes() {
        let dir = TempDir::new().unwrap();
        populate(dir.path(), &STANDARD_IMAGES);

        let manifest = AssetManifest::standard(dir.path());
        assert!(manifest.verify().is_ok());
        assert!(manifest.missing().is_empty());
    }

    #[test]
    fn test_reports_first_missing_file() {
        let dir = TempDir::new().unwrap();
        populate(dir.path(), &STANDARD_IMAGES[..4]);

        let manifest = AssetManifest::standard(dir.path());
        match manifest.verify() {
            Err(ProfileError::MissingAsset(path)) => {
                assert_eq!(path, dir.path().join("Images/tube.png"));
            }
            other => panic!("expected a missing asset, got {other:?}"),
        }
        assert_eq!(manifest.missing().len(), 3);
    }

    #[test]
    fn test_error_names_the_file() {
        let manifest = AssetManifest::new("/nonexistent", ["bird.png"]);
        let message = manifest.verify().unwrap_err().to_string();
        assert!(message.contains("bird.png"));
    }
}
