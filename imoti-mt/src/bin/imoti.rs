use clap::{Arg, ArgMatches, Command};
use imoti_core::{JsonFileSource, ListingSource, ReportRenderer, SampleListings, TextReport};
use imoti_mt::{
    GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator, TranslationOptions,
    assemble_city_index, normalize,
};
use serde_json::Value;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("imoti")
        .version("0.1.0")
        .about("Translation CLI for Bulgarian property listings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("sample")
                .about("Write the embedded sample listings as JSON")
                .arg(output_arg()),
        )
        .subcommand(with_pipeline_args(
            Command::new("translate")
                .about("Translate a listing tree, preserving its structure"),
        ))
        .subcommand(with_pipeline_args(
            Command::new("report")
                .about("Translate a listing tree and render the per-city report"),
        ))
        .get_matches();

    match matches.subcommand() {
        Some(("sample", sub)) => run_sample(sub),
        Some(("translate", sub)) => run_translate(sub).await,
        Some(("report", sub)) => run_report(sub).await,
        _ => unreachable!("subcommand is required"),
    }
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Write the result to a file instead of stdout")
}

fn with_pipeline_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("input")
            .long("input")
            .short('i')
            .help("JSON file with the listing tree (default: embedded sample)"),
    )
    .arg(output_arg())
    .arg(
        Arg::new("source-locale")
            .long("source")
            .short('s')
            .help("Source language code (default: bg)")
            .default_value("bg"),
    )
    .arg(
        Arg::new("target-locale")
            .long("target")
            .short('t')
            .help("Target language code (default: en)")
            .default_value("en"),
    )
    .arg(
        Arg::new("mock")
            .long("mock")
            .short('m')
            .help("Use the identity mock translator instead of Google Translate")
            .action(clap::ArgAction::SetTrue),
    )
    .arg(
        Arg::new("verbose")
            .long("verbose")
            .short('v')
            .help("Show detailed pipeline progress")
            .action(clap::ArgAction::SetTrue),
    )
}

fn run_sample(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let tree = SampleListings.fetch_listings()?;
    let pretty = serde_json::to_string_pretty(&tree)?;
    write_output(matches.get_one::<String>("output"), &pretty)
}

async fn run_translate(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let verbose = matches.get_flag("verbose");
    let opts = options_from(matches);
    let tree = load_tree(matches, verbose)?;
    let translator = build_translator(matches.get_flag("mock"))?;

    if verbose {
        println!(
            "🌍 {} → {} via {}",
            opts.source_locale,
            opts.target_locale,
            translator.provider_name()
        );
    }

    let translated = normalize(&tree, translator.as_ref(), &opts).await?;

    if verbose {
        println!("✅ Translated tree, structure preserved");
    }

    let pretty = serde_json::to_string_pretty(&translated)?;
    write_output(matches.get_one::<String>("output"), &pretty)
}

async fn run_report(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let verbose = matches.get_flag("verbose");
    let opts = options_from(matches);
    let tree = load_tree(matches, verbose)?;
    let translator = build_translator(matches.get_flag("mock"))?;

    if verbose {
        println!(
            "🌍 {} → {} via {}",
            opts.source_locale,
            opts.target_locale,
            translator.provider_name()
        );
    }

    let translated = normalize(&tree, translator.as_ref(), &opts).await?;
    let index = assemble_city_index(&translated, translator.as_ref(), &opts).await?;

    if verbose {
        println!(
            "✅ Grouped {} listings into {} cities",
            index.record_count(),
            index.len()
        );
    }

    let report = String::from_utf8(TextReport.render(&index))?;
    write_output(matches.get_one::<String>("output"), &report)
}

fn options_from(matches: &ArgMatches) -> TranslationOptions {
    let source = matches.get_one::<String>("source-locale").unwrap();
    let target = matches.get_one::<String>("target-locale").unwrap();
    TranslationOptions::new(source, target)
}

fn load_tree(matches: &ArgMatches, verbose: bool) -> Result<Value, Box<dyn std::error::Error>> {
    match matches.get_one::<String>("input") {
        Some(path) => {
            if verbose {
                println!("📦 Loading listings from {}", path);
            }
            let source = JsonFileSource::new(path);
            Ok(source.fetch_listings()?)
        }
        None => {
            if verbose {
                println!("📦 Using embedded sample listings");
            }
            Ok(SampleListings.fetch_listings()?)
        }
    }
}

fn build_translator(
    use_mock: bool,
) -> Result<Box<dyn MachineTranslator>, Box<dyn std::error::Error>> {
    if use_mock {
        return Ok(Box::new(MockTranslator::new(MockMode::NoOp)));
    }

    // Check for API key
    if env::var("GOOGLE_TRANSLATE_API_KEY").is_err() {
        eprintln!("❌ GOOGLE_TRANSLATE_API_KEY environment variable not set");
        eprintln!("   Set it with: export GOOGLE_TRANSLATE_API_KEY=your_api_key");
        eprintln!("   Or use --mock to run without the API");
        return Err("Missing API key".into());
    }

    Ok(Box::new(GoogleTranslateProvider::from_env()?))
}

fn write_output(
    target: Option<&String>,
    content: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match target {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("✅ Written to {}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}
