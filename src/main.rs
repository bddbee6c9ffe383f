use anyhow::{Context, Result};
use clap::Parser;
use denbun::{
    MorseTransmitter, SAMPLE_RATE, SymbolTable, TONE_FREQUENCY, UNIT_DURATION, parse_code, render,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text to transmit. Read from stdin when omitted.
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = SAMPLE_RATE)]
    sample_rate: u32,

    /// Length of one dit in seconds
    #[arg(long, default_value_t = UNIT_DURATION)]
    unit: f64,

    /// Tone frequency in Hz
    #[arg(long, default_value_t = TONE_FREQUENCY)]
    frequency: f64,

    /// Symbol table file (`<char> <code>` per line) replacing the built-in table
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,

    /// Treat the input as a dot/dash code string instead of text
    #[arg(long)]
    code: bool,

    /// Print the code without playing it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    // Set up logging. Use `RUST_LOG=info` or `RUST_LOG=debug` to see output.
    env_logger::init();
    let cli = Cli::parse();

    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read text from stdin")?;
            input.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let mut transmitter = MorseTransmitter::new(cli.sample_rate, cli.unit, cli.frequency)?;
    if let Some(path) = &cli.table {
        log::info!("Loading symbol table: {:?}", path);
        let table = SymbolTable::from_file(path)
            .with_context(|| format!("failed to load symbol table {}", path.display()))?;
        transmitter = transmitter.with_table(table);
    }

    let tokens = if cli.code {
        parse_code(&text)
    } else {
        transmitter.translate(&text)
    };
    println!("{} -> {}", text, render(&tokens));

    if cli.dry_run {
        return Ok(());
    }

    transmitter.open().context("failed to open audio output")?;
    transmitter.play(tokens).context("transmission failed")?;
    transmitter.close()?;

    Ok(())
}
