use std::path::PathBuf;

use crate::db::init_at;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path, DB_FILE};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    init_at(&resolved)?;

    println!("Initialized fintrack at {}", resolved.display());
    println!("Database:   {}", resolved.join(DB_FILE).display());
    Ok(())
}
