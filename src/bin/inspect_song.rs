//! Show how one title is tokenized and counted against a lyrics body
//! Usage: inspect-song <title> [lyrics_file]   (lyrics read from stdin when no file)

use anyhow::{Context, Result};
use std::io::Read;

use lyrics_stats::analyze::title_percentage;
use lyrics_stats::config::AnalyzerConfig;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: inspect-song <title> [lyrics_file]");
        eprintln!();
        eprintln!("Prints the normalized title, the lyric word count and the");
        eprintln!("title mention count/percentage. Reads lyrics from stdin");
        eprintln!("when no file is given.");
        std::process::exit(1);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let title = &args[1];
    let lyrics = match args.get(2) {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read lyrics from stdin")?;
            buf
        }
    };

    let analyzer = AnalyzerConfig::load(None)?.build_analyzer()?;
    let normalizer = analyzer.normalizer();

    let title_tokens = normalizer.normalize(title);
    let lyrics_tokens = normalizer.normalize(&lyrics);
    let mentions = analyzer.count_mentions(&title_tokens, &lyrics_tokens);

    println!("Title:        {:?}", title);
    println!("Title tokens: {:?}", title_tokens);
    println!("Lyric words:  {}", lyrics_tokens.len());
    println!("Match mode:   {:?}", analyzer.match_mode());
    println!("{:-<60}", "");
    println!("Mentions:     {}", mentions);
    println!(
        "Percentage:   {:.2}%",
        title_percentage(mentions, title_tokens.len(), lyrics_tokens.len())
    );

    if title_tokens.is_empty() {
        println!("\nTitle normalizes to nothing; it can never be mentioned.");
    }

    Ok(())
}
