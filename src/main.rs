use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use notecheck::capture;
use notecheck::detection::{Analyzer, MockAnalyzer, RandomSource, SeededRandom, ThreadRandom};
use notecheck::models::DetectionResult;

#[derive(Parser)]
#[command(name = "notecheck")]
#[command(about = "Check a currency note image for counterfeit markers (demo)")]
struct Cli {
    /// Path to an input image; omit to launch the GUI
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// Print the detection result as JSON
    #[arg(long)]
    json: bool,

    /// Seed the mock detector for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated analysis latency in milliseconds
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let Some(path) = args.image_path.clone() else {
        return run_gui();
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(analyze_file(&args, &path))
}

#[cfg(feature = "gui")]
fn run_gui() -> anyhow::Result<()> {
    notecheck::gui::run()?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn run_gui() -> anyhow::Result<()> {
    anyhow::bail!("no image given and this build has no GUI; pass an image path")
}

async fn analyze_file(args: &Cli, path: &PathBuf) -> anyhow::Result<()> {
    let image = capture::accept_upload_path(path).await?;

    let random: Arc<dyn RandomSource> = match args.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };
    let analyzer = MockAnalyzer::new()
        .with_random(random)
        .with_latency(Duration::from_millis(args.delay_ms));

    let result = analyzer.analyze(&image).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn print_report(result: &DetectionResult) {
    println!("\n=== Currency Analysis Results ===");
    let verdict = if result.is_genuine { "GENUINE" } else { "FAKE" };
    println!(
        "Verdict: {} ({:.0}% confidence)",
        verdict,
        result.confidence * 100.0
    );
    if let Some(message) = &result.message {
        println!("{message}");
    }

    let Some(features) = &result.features else {
        return;
    };

    println!("\nFeature analysis:");
    let mark = |detected: bool| if detected { "[x]" } else { "[ ]" };
    if let Some(check) = &features.watermark {
        println!(
            "  {} Watermark        {:.0}%",
            mark(check.detected),
            check.confidence * 100.0
        );
    }
    if let Some(check) = &features.serial_number {
        let value = check.value.as_deref().unwrap_or("-");
        println!(
            "  {} Serial Number    {:.0}%  ({})",
            mark(check.detected),
            check.confidence * 100.0,
            value
        );
    }
    if let Some(check) = &features.security_thread {
        println!(
            "  {} Security Thread  {:.0}%",
            mark(check.detected),
            check.confidence * 100.0
        );
    }
    if let Some(check) = &features.microprinting {
        println!(
            "  {} Microprinting    {:.0}%",
            mark(check.detected),
            check.confidence * 100.0
        );
    }
}
