//! The `wordquiz check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use wordquiz_core::parser::decode_word_list;

pub fn execute(path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let words = decode_word_list(&content)
        .with_context(|| format!("invalid word list in {}", path.display()))?;

    for item in &words {
        println!("  {}: {}", item.word, item.meaning);
    }
    println!("{}: {} words OK", path.display(), words.len());
    Ok(())
}
