use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use dotenvy::dotenv;
use tracing::error;

mod catalog;
mod composer;
mod config;
mod imaging;
mod openai;
mod pipeline;
mod selection;
mod utils;

use catalog::Category;
use config::Config;
use pipeline::Studio;
use selection::Selection;
use utils::logging::init_logging;

struct CliArgs {
    list: bool,
    generate: bool,
    image: Option<PathBuf>,
    out: Option<PathBuf>,
    selection: Selection,
}

fn usage() -> &'static str {
    "Usage: pet_hanbok_studio [--list] [--generate] [--image <path>] \
[--animal <label|N>] [--gender <label|N>] [--outfit <label|N>] \
[--color <label|N>]... [--accessory <label|N>] [--mood <label|N>] \
[--note <text>] [--out <path>]"
}

fn category_for_flag(flag: &str) -> Option<Category> {
    match flag {
        "--animal" => Some(Category::Animal),
        "--gender" => Some(Category::Gender),
        "--outfit" => Some(Category::OutfitStyle),
        "--color" => Some(Category::ColorScheme),
        "--accessory" => Some(Category::Accessory),
        "--mood" => Some(Category::Mood),
        _ => None,
    }
}

/// Accepts either the exact display label, an unambiguous label prefix
/// (handy because the labels carry emoji), or a 1-based index as shown
/// by --list.
fn resolve_label(category: Category, value: &str) -> Result<String> {
    let options = catalog::options(category);
    if let Ok(index) = value.parse::<usize>() {
        if (1..=options.len()).contains(&index) {
            return Ok(options[index - 1].label.to_string());
        }
        bail!(
            "'{}' has {} options; index {} is out of range",
            category.display_name(),
            options.len(),
            index
        );
    }

    let matches: Vec<&str> = options
        .iter()
        .filter(|opt| opt.label == value || opt.label.starts_with(value))
        .map(|opt| opt.label)
        .collect();
    match matches.as_slice() {
        [label] => Ok(label.to_string()),
        [] => Err(anyhow!(
            "no option '{}' in '{}' (see --list)",
            value,
            category.display_name()
        )),
        _ => Err(anyhow!(
            "'{}' matches more than one option in '{}'",
            value,
            category.display_name()
        )),
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs {
        list: false,
        generate: false,
        image: None,
        out: None,
        selection: Selection::with_defaults(),
    };

    let mut iter = args.iter().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--list" => cli.list = true,
            "--generate" => cli.generate = true,
            "--image" => {
                let value = iter.next().context("--image requires a path")?;
                cli.image = Some(PathBuf::from(value));
            }
            "--out" => {
                let value = iter.next().context("--out requires a path")?;
                cli.out = Some(PathBuf::from(value));
            }
            "--note" => {
                let value = iter.next().context("--note requires text")?;
                cli.selection.addendum = Some(value.clone());
            }
            other => match category_for_flag(other) {
                Some(category) => {
                    let value = iter
                        .next()
                        .with_context(|| format!("{other} requires a value"))?;
                    let label = resolve_label(category, value)?;
                    cli.selection.choose(category, label);
                }
                None => bail!("unknown flag '{other}'"),
            },
        }
    }

    Ok(cli)
}

fn print_catalog() {
    for &category in catalog::categories() {
        let mode = if category.is_multi_select() {
            "multi-select"
        } else {
            "single-select"
        };
        println!("{} ({mode}):", category.display_name());
        for (index, opt) in catalog::options(category).iter().enumerate() {
            println!("  {}. {}", index + 1, opt.label);
        }
        println!();
    }
}

async fn run(cli: CliArgs, config: Config) -> Result<()> {
    let studio = Studio::new(config);

    let result = if cli.generate {
        studio.imagine(&cli.selection).await?
    } else {
        let upload = match &cli.image {
            Some(path) => Some(
                tokio::fs::read(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
            ),
            None => None,
        };
        studio.dress_up(upload.as_deref(), &cli.selection).await?
    };

    let out_path = cli
        .out
        .unwrap_or_else(|| PathBuf::from(result.file_name));
    tokio::fs::write(&out_path, &result.png)
        .await
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!(
        "✅ 한복 입히기 완료! {} ({}x{}, {})",
        out_path.display(),
        result.width,
        result.height,
        result.mime_type
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("❌ {err}");
            eprintln!("{}", usage());
            return ExitCode::FAILURE;
        }
    };

    if cli.list {
        print_catalog();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {err}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_level);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("generation failed: {err:#}");
            eprintln!("❌ 오류 발생: {err:#}");
            ExitCode::FAILURE
        }
    }
}
