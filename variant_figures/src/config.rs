use std::env;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::helper_functions::project_root;
use crate::models::{FigureError, Result};

pub const DATA_DIR_NAME: &str = "Data";

pub const REGION_VARIANTS_FILE: &str = "Variant.bed";
pub const CHROMOSOME_MAP_FILE: &str = "Genome_text.tsv";
pub const WINDOW_10KB_FILE: &str = "10Kb_window_Variant_Count.bed";
pub const WINDOW_10KB_HOMOZYGOUS_FILE: &str = "10Kb_window_Variant_Count_SNP_InDel_Homozygous.bed";
pub const WINDOW_10KB_HETEROZYGOUS_FILE: &str = "10Kb_window_Variant_Count_SNP_InDel_Heterozygous.bed";
pub const WINDOW_500KB_FILE: &str = "500Kb_window_Variant_Count.bed";
pub const CENTROMERE_FILE: &str = "T2T-MFA8v1.0.centromere.bed";
pub const SV_LENGTH_FILE: &str = "SV_type_Median_Length.tsv";
pub const SV_WINDOW_FILE: &str = "merged_SV_df.tsv";

/// Where inputs are read from and figures are written to.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// `$PROJECT_ROOT/Data` for inputs; `$FIGURE_OUTPUT_DIR` or the working
    /// directory for outputs.
    pub fn from_env() -> Result<Self> {
        let output_dir = match env::var_os("FIGURE_OUTPUT_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir()?,
        };
        Self::new(project_root(), output_dir)
    }

    pub fn new(root: PathBuf, output_dir: PathBuf) -> Result<Self> {
        let data_dir = root.join(DATA_DIR_NAME);
        if !data_dir.is_dir() {
            error!("Data directory not found at {}", data_dir.display());
            return Err(FigureError::MissingInput(data_dir));
        }
        create_dir_all(&output_dir)?;

        Ok(Self {
            root,
            data_dir,
            output_dir,
        })
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_directory_fails_fast() {
        let root = tempfile::tempdir().unwrap();
        let err = PipelineConfig::new(root.path().to_path_buf(), root.path().to_path_buf()).unwrap_err();
        match err {
            FigureError::MissingInput(path) => assert!(path.ends_with("Data")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn data_files_resolve_under_data_directory() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("Data")).unwrap();
        let out = root.path().join("figures");

        let config = PipelineConfig::new(root.path().to_path_buf(), out.clone()).unwrap();
        assert_eq!(config.data_file(CENTROMERE_FILE), root.path().join("Data").join(CENTROMERE_FILE));
        assert!(out.is_dir());
    }
}
