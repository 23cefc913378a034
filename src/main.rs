//! # chatseed CLI
//!
//! Command-line interface for the chatseed library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatseed::ChatseedError;
use chatseed::cli::Args;
use chatseed::pipeline::Pipeline;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    // -v wins over RUST_LOG
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatseedError> {
    let total_start = Instant::now();
    let pipeline = Pipeline::new(args.to_config()?)?;
    let config = pipeline.config();

    // Print header
    println!("🌱 chatseed v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", args.output.display());
    println!("👤 User:    {}", config.user_name);
    println!("🎭 Char:    {}", config.char_name);
    println!("📄 Style:   {}", config.style);
    println!("⏱️  Split:   {} min", config.split_minutes);
    println!("📏 Limit:   {} chars", config.character_limit);
    if let Some(seed) = config.seed {
        println!("🎲 Seed:    {}", seed);
    }
    println!();

    println!("⏳ Processing export...");
    let report = pipeline.run_file(&args.input, &args.output)?;
    let total_time = total_start.elapsed();

    println!("   Found {} messages", report.parsed);
    if report.removed + report.replaced > 0 {
        println!(
            "🔍 Filtered: {} removed, {} replaced",
            report.removed, report.replaced
        );
    }
    if report.unattributed > 0 {
        println!("👥 Skipped {} messages from other senders", report.unattributed);
    }
    println!(
        "🧩 {} conversations, {} kept ({} too short, {} one-sided)",
        report.blocks,
        report.accepted,
        report.rejected_short,
        report.rejected_one_sided
    );
    println!(
        "🎯 Selected {} of {} within the limit",
        report.selected, report.accepted
    );

    println!();
    println!("✅ Done! Output saved to {}", args.output.display());

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Messages:       {}", report.parsed);
    println!("   Attributed:     {}", report.attributed());
    println!("   Conversations:  {}", report.selected);
    println!(
        "   Characters:     {} / {}",
        report.output_chars, config.character_limit
    );

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());

    Ok(())
}
