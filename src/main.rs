use chrono::Utc;
use clap::Parser;
use fridge_buddy::{cli, config, error, matcher, normalizer, review, scanner};
use cli::{Cli, Commands};
use config::{validate_threshold, Config};
use error::{FridgeBuddyError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use matcher::{GroceryMatcher, IntakeReport};
use rayon::prelude::*;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Match { inputs, output, catalog, names, threshold, review } => {
            let config = Config::load()?;
            let threshold = validate_threshold(threshold.unwrap_or(config.fuzzy_threshold))?;

            // 標準出力はJSON用なので進捗は標準エラーに出す
            eprintln!("🧾 fridge-buddy - レシート照合\n");

            // 1. レシート収集
            eprintln!("[1/3] レシートを読み込み中...");
            let receipts = scanner::collect_receipts(&inputs)?;
            if receipts.is_empty() {
                let joined: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
                return Err(FridgeBuddyError::NoReceiptsFound(joined.join(", ")));
            }
            eprintln!("✔ {}件のレシートを検出\n", receipts.len());

            // 2. 照合
            eprintln!("[2/3] 食品を照合中...");
            let matcher = build_matcher(&config, catalog.as_deref(), names.as_deref(), threshold)?;
            let now = Utc::now();

            let progress = ProgressBar::new(receipts.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let reports: Vec<(String, IntakeReport)> = receipts
                .par_iter()
                .map(|receipt| {
                    let items = scanner::load_items(receipt)?;
                    let report = matcher.intake(&items, now);
                    progress.inc(1);
                    Ok((receipt.file_name.clone(), report))
                })
                .collect::<Result<Vec<_>>>()?;
            progress.finish_and_clear();

            let mut fridge_items = Vec::new();
            for (file_name, report) in reports {
                eprintln!(
                    "  {}: {}/{}件を認識",
                    file_name,
                    report.items.len(),
                    report.total()
                );
                if !report.unmatched.is_empty() {
                    let names: Vec<&str> = report.unmatched.iter().map(|i| i.name.as_str()).collect();
                    eprintln!("    未認識: {}", names.join(", "));
                }
                fridge_items.extend(report.items);
            }
            eprintln!("✔ 照合完了\n");

            // 3. 確認・保存
            eprintln!("[3/3] 結果を保存中...");
            let fridge_items = if review {
                review::run_interactive_review(fridge_items, matcher.catalog())?
            } else {
                fridge_items
            };

            let json = serde_json::to_string_pretty(&fridge_items)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }

            eprintln!("\n✅ {}件の食品を登録候補にしました", fridge_items.len());
        }

        Commands::Lookup { text, catalog, names } => {
            let config = Config::load()?;
            let matcher = build_matcher(&config, catalog.as_deref(), names.as_deref(), config.fuzzy_threshold)?;

            println!("正規化: {:?}", normalizer::normalize_text(&text));
            let found = matcher
                .find_match(&text)
                .and_then(|m| matcher.catalog().lookup(&m.name).map(|entry| (m, entry)));

            match found {
                Some((m, entry)) => {
                    println!("一致: {} ({}, 距離 {:.3})", m.name, m.kind, m.distance);
                    println!("  食品: {} [{}]", entry.name, entry.grocery_type);
                    println!("  保存期間: {}日", entry.default_exp_interval / 86_400);
                }
                None => println!("一致する食品はありません"),
            }
        }

        Commands::Normalize { text } => {
            let normalized = normalizer::normalize_text(&text);
            println!("正規化: {:?}", normalized);
            println!("単語: {:?}", normalizer::words(&normalized));
        }

        Commands::Catalog { catalog, names, types } => {
            let config = Config::load()?;
            let matcher = build_matcher(&config, catalog.as_deref(), names.as_deref(), config.fuzzy_threshold)?;
            let catalog = matcher.catalog();

            println!("カタログ:");
            println!("  食品数: {}", catalog.len());
            println!("  照合名数: {}", catalog.name_count());
            println!("  最大単語数: {}", catalog.max_words());

            if types {
                println!("食品種別:");
                for grocery_type in catalog.grocery_types() {
                    println!("  - {}", grocery_type);
                }
            }
        }

        Commands::Config { set_catalog, set_names, set_threshold, show } => {
            let mut config = Config::load()?;
            let mut changed = false;

            if let Some(path) = set_catalog {
                config.set_catalog_path(path);
                changed = true;
            }
            if let Some(path) = set_names {
                config.set_names_path(path);
                changed = true;
            }
            if let Some(threshold) = set_threshold {
                config.set_fuzzy_threshold(threshold)?;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                let display = |p: &Option<std::path::PathBuf>| {
                    p.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".to_string())
                };
                println!("設定:");
                println!("  カタログ: {}", display(&config.catalog_path));
                println!("  照合名: {}", display(&config.names_path));
                println!("  あいまい照合の閾値: {}", config.fuzzy_threshold);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_matcher(
    config: &Config,
    catalog: Option<&Path>,
    names: Option<&Path>,
    threshold: f32,
) -> Result<GroceryMatcher> {
    let paths = config.resolve_catalog_paths(catalog, names)?;
    let catalog = matcher::load_catalog(&paths)?;
    Ok(GroceryMatcher::with_threshold(catalog, threshold))
}
