use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::controller::Snapshot;
use crate::error::Result;
use crate::render::OutputFile;
use crate::render::Render;
use crate::template::SummaryPage;

const MAIN_DIR_NAME: &str = "glycolens";
const SNAPSHOT_FILE_NAME: &str = "snapshot.json";
const INDEX_FILE_NAME: &str = "index.html";

// The report is structured as follows:
//
// ./glycolens/snapshot.json
// ./glycolens/index.html
//
pub struct Report {
    root_path: PathBuf,
    snapshot_file_path: PathBuf,
    index_file_path: PathBuf,
}

impl Report {
    /// Creates the report directory under `path`, keeping it if it exists.
    pub fn init(path: &Path) -> Result<Report> {
        let root_path = path.join(MAIN_DIR_NAME);
        let snapshot_file_path = root_path.join(SNAPSHOT_FILE_NAME);
        let index_file_path = root_path.join(INDEX_FILE_NAME);

        fs::create_dir_all(&root_path)?;

        Ok(Self {
            root_path,
            snapshot_file_path,
            index_file_path,
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn generate(&self, snapshot: &Snapshot) -> Result<()> {
        write(snapshot, &self.snapshot_file_path)?;
        write(&SummaryPage::new(snapshot), &self.index_file_path)?;

        info!(path = %self.root_path.display(), rows = snapshot.rows, "wrote the report");
        Ok(())
    }
}

fn write<R: Render>(content: &R, path: &Path) -> Result<()> {
    let mut file = OutputFile::create(path)?;
    content.render(&mut file)?;
    file.finish()
}
