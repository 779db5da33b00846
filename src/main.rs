use std::{path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use sentence_tour::{
    build_tour, render::summary, render_sentence, render_transition, tokenize_all, Error,
    Playback, Settings,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sentences to rotate through
    sentences: Vec<String>,
    /// Read sentences from a file, one per line
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// JSON settings file; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Keep the given order instead of minimizing changes
    #[arg(long)]
    no_best: bool,
    /// Shuffle the order, or start the best cycle at a random sentence
    #[arg(short, long)]
    random: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    cycles: Option<usize>,
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Print the planned tour as JSON instead of playing it
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_json(path)?,
            None => Settings::default(),
        };
        settings.best &= !self.no_best;
        settings.random |= self.random;
        settings.verbose |= self.verbose;
        settings.seed = self.seed.or(settings.seed);
        settings.cycles = self.cycles.unwrap_or(settings.cycles);
        settings.interval_ms = self.interval_ms.unwrap_or(settings.interval_ms);
        Ok(settings)
    }

    fn raw_sentences(&self) -> Result<Vec<String>> {
        let mut raws = self.sentences.clone();
        if let Some(path) = &self.file {
            let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            raws.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        }
        if raws.is_empty() {
            return Err(Error::NoSentences.into());
        }
        Ok(raws)
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings().context("loading settings")?;
    init_tracing(settings.verbose);
    debug!(?settings, "starting");

    let raws = cli.raw_sentences().context("reading sentences")?;
    let sentences = tokenize_all(&raws).context("tokenizing sentences")?;

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let tour = build_tour(&sentences, settings.tour_options(), &mut rng);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tour)?);
        return Ok(());
    }

    let mut playback = Playback::new(tour);
    if let Some(intro) = playback.intro() {
        println!("  {}", render_sentence(intro.to));
    }
    if playback.len() < 2 {
        warn!("a single sentence has nothing to rotate to");
        return Ok(());
    }
    let interval = Duration::from_millis(settings.interval_ms);
    for _ in 0..settings.cycles * playback.len() {
        let Some(leg) = playback.advance() else {
            break;
        };
        if !interval.is_zero() {
            thread::sleep(interval);
        }
        debug!(
            from = leg.from_sentence,
            to = leg.to_sentence,
            "{}",
            summary(&leg.script)
        );
        println!("~ {}", render_transition(&leg.script));
        println!("  {}", render_sentence(leg.script.to));
    }
    Ok(())
}
