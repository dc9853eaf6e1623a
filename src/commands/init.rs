use std::path::Path;

use crate::error::Result;
use crate::store::files::FileStorage;

pub fn run(base: &Path) -> Result<()> {
    let storage = FileStorage::init(base)?;
    eprintln!("Initialized .taskflow/ in {}", base.display());
    tracing::debug!(root = %storage.root().display(), "initialized data directory");
    Ok(())
}
