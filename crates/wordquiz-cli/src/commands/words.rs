//! The `wordquiz words` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use wordquiz_core::generator::is_fallback;
use wordquiz_core::{UserProfile, WordItem};

use super::{build_engine, ProviderArgs};

pub async fn execute(name: String, level: String, goal: String, args: ProviderArgs) -> Result<()> {
    let config = args.load_config()?;
    let engine = build_engine(&config, &args)?;

    engine
        .setup_profile(UserProfile::new(name.as_str(), level, goal))
        .await?;
    let words = engine.generate_words(&name).await?;

    if is_fallback(&words) {
        eprintln!("Warning: word generation failed, showing the fallback list.");
    }
    println!("{}", render_table(&words));
    Ok(())
}

fn render_table(words: &[WordItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["単語", "意味", "解説", "選択肢"]);
    for item in words {
        table.add_row(vec![
            Cell::new(&item.word),
            Cell::new(&item.meaning),
            Cell::new(&item.explanation),
            Cell::new(item.options.join(" / ")),
        ]);
    }
    table
}
