use crate::{Dataset, Result};
use csv::Writer;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_HEADER: [&str; 8] = [
    "Price",
    "Type",
    "Area(sqm)",
    "NoBedrooms",
    "NoBathrooms",
    "Furnishing",
    "Amenities",
    "Location",
];

/// Durable storage for the dataset. Every write carries the full dataset so far.
pub trait DatasetSink: Send + Sync {
    /// Overwrite the checkpoint for `page` with the dataset so far.
    fn write_checkpoint(&self, page: u32, dataset: &Dataset) -> Result<PathBuf>;

    /// Write the completed dataset once the crawl is done.
    fn write_final(&self, dataset: &Dataset) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct CsvSink {
    output_dir: PathBuf,
    final_file_name: String,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>, final_file_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            final_file_name: final_file_name.into(),
        }
    }

    pub fn checkpoint_path(&self, page: u32) -> PathBuf {
        self.output_dir.join(format!("Backup_after_{}_pages.csv", page))
    }

    pub fn final_path(&self) -> PathBuf {
        self.output_dir.join(&self.final_file_name)
    }

    fn write_csv(path: &Path, dataset: &Dataset) -> Result<()> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(CSV_HEADER)?;
        for record in dataset {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl DatasetSink for CsvSink {
    fn write_checkpoint(&self, page: u32, dataset: &Dataset) -> Result<PathBuf> {
        let path = self.checkpoint_path(page);
        Self::write_csv(&path, dataset)?;
        info!("Checkpoint after page {} written to {} ({} rows)", page, path.display(), dataset.len());
        Ok(path)
    }

    fn write_final(&self, dataset: &Dataset) -> Result<PathBuf> {
        let path = self.final_path();
        Self::write_csv(&path, dataset)?;
        info!("Final dataset written to {} ({} rows)", path.display(), dataset.len());
        Ok(path)
    }
}
