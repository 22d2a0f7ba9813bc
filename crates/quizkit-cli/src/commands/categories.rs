//! The `quizkit categories` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = config.load_catalog()?;

    for category in catalog.get_categories() {
        let count = catalog.get_quizzes_by_category(category).count();
        println!("{category} ({count})");
    }

    Ok(())
}
