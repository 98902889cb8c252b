use anyhow::{Context, Result, bail};
use catalog::{Catalog, Category, Direction, PoolItem};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::Rng;
use session::{DecideOutcome, RefillOutcome, SessionConfig, SwipeEngine, SwipeSession};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// swipe-deck - terminal harness for swipe sessions
#[derive(Parser)]
#[command(name = "swipe-deck")]
#[command(about = "Swipe through candidate and job pools from the terminal", long_about = None)]
struct Cli {
    /// JSON catalog file (`{"candidates": [...], "jobs": [...]}`); built-in
    /// mock data when absent
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory of the decision journal (overrides SWIPE_JOURNAL_DIR)
    #[arg(long, global = true)]
    journal_dir: Option<PathBuf>,

    /// Recommendation backend base URL (overrides SWIPE_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Delay before the cursor advances after a decision (overrides SWIPE_SETTLE_MS)
    #[arg(long, global = true)]
    settle_ms: Option<u64>,

    /// Number of items presented at once (overrides SWIPE_WINDOW_SIZE)
    #[arg(long, global = true)]
    window_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Swipe through a pool, from `--moves` or interactively
    Swipe {
        #[arg(long)]
        actor: String,

        /// `job` (job seeker) or `candidate` (recruiter)
        #[arg(long, default_value = "job")]
        category: Category,

        /// Moves to apply, e.g. `lrrl`; reads stdin when absent
        #[arg(long)]
        moves: Option<String>,
    },

    /// Show accepted and rejected ids
    History {
        #[arg(long)]
        actor: String,

        #[arg(long, default_value = "job")]
        category: Category,
    },

    /// Show the items the actor liked
    Liked {
        #[arg(long)]
        actor: String,

        #[arg(long, default_value = "job")]
        category: Category,
    },

    /// Make random decisions through a real session
    Simulate {
        #[arg(long)]
        actor: String,

        #[arg(long, default_value = "job")]
        category: Category,

        /// Number of decisions to attempt
        #[arg(long, default_value = "20")]
        swipes: usize,

        /// Probability of a right swipe
        #[arg(long, default_value = "0.5")]
        accept_ratio: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let start = Instant::now();
    let catalog = Arc::new(match &cli.catalog {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    });
    let (candidates, jobs) = catalog.counts();
    println!(
        "{} Catalog ready: {} candidates, {} jobs ({:?})",
        "✓".green(),
        candidates,
        jobs,
        start.elapsed()
    );

    let engine = SwipeEngine::from_config(&config, catalog)?;

    match cli.command {
        Commands::Swipe {
            actor,
            category,
            moves,
        } => handle_swipe(&engine, actor, category, moves).await?,
        Commands::History { actor, category } => handle_history(&engine, &actor, category),
        Commands::Liked { actor, category } => handle_liked(&engine, &actor, category).await,
        Commands::Simulate {
            actor,
            category,
            swipes,
            accept_ratio,
        } => handle_simulate(&engine, actor, category, swipes, accept_ratio).await?,
    }

    Ok(())
}

/// Environment first, then command-line overrides
fn build_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = SessionConfig::from_env().context("Invalid SWIPE_* environment")?;
    if let Some(url) = &cli.backend_url {
        config.backend_url = Some(url.clone());
    }
    if let Some(dir) = &cli.journal_dir {
        config.journal_dir = dir.clone();
    }
    if let Some(ms) = cli.settle_ms {
        config.settle_delay = Duration::from_millis(ms);
    }
    if let Some(size) = cli.window_size {
        config.window_size = size;
    }
    config.validate()?;
    Ok(config)
}

/// Handle the 'swipe' command
async fn handle_swipe(
    engine: &SwipeEngine,
    actor: String,
    category: Category,
    moves: Option<String>,
) -> Result<()> {
    let session = engine.session(actor, category);
    print_refill(&session.load().await);
    print_window(&session);

    match moves {
        Some(moves) => {
            for step in moves.chars().filter(|c| !c.is_whitespace()) {
                let direction: Direction = step.to_string().parse()?;
                apply_move(&session, direction).await?;
            }
        }
        None => {
            println!("Enter {} / {} / {} / {}", "l".red(), "r".green(), "refill", "q");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                match line.trim() {
                    "" => continue,
                    "q" | "quit" => break,
                    "refill" => {
                        print_refill(&session.request_refill().await);
                        print_window(&session);
                    }
                    other => match other.parse::<Direction>() {
                        Ok(direction) => apply_move(&session, direction).await?,
                        Err(e) => println!("{} {}", "?".yellow(), e),
                    },
                }
            }
        }
    }

    let status = session.status();
    info!(
        "Session ended at position {} of {} ({:?})",
        status.position, status.pool_len, status.state
    );
    Ok(())
}

async fn apply_move(session: &SwipeSession, direction: Direction) -> Result<()> {
    match session.decide(direction).await? {
        DecideOutcome::Recorded(decision) => {
            let label = match direction {
                Direction::Right => decision.outcome.to_string().green(),
                Direction::Left => decision.outcome.to_string().red(),
            };
            println!("{} {}", label, decision.item_id);
        }
        DecideOutcome::Ignored(reason) => {
            println!("{} ignored ({:?})", direction_arrow(direction), reason);
        }
    }

    if session.window().is_empty() {
        print_refill(&session.refill_if_exhausted().await);
    }
    print_window(&session);
    Ok(())
}

/// Handle the 'history' command
fn handle_history(engine: &SwipeEngine, actor: &str, category: Category) {
    let journal = engine.journal();
    let accepted = journal.list_accepted(actor, category);
    let rejected = journal.list_rejected(actor, category);

    println!("{}", format!("History for {actor} ({category}):").bold().blue());
    println!("{}Accepted ({}): {}", "• ".green(), accepted.len(), accepted.join(", "));
    println!("{}Rejected ({}): {}", "• ".red(), rejected.len(), rejected.join(", "));
}

/// Handle the 'liked' command
async fn handle_liked(engine: &SwipeEngine, actor: &str, category: Category) {
    let shortlist = engine.provider().shortlist(actor, category).await;

    println!("{}", format!("Liked by {actor} ({category}):").bold().blue());
    if shortlist.is_empty() {
        println!("  nothing yet");
    }
    for (rank, item) in shortlist.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), describe(item));
    }
}

/// Handle the 'simulate' command
async fn handle_simulate(
    engine: &SwipeEngine,
    actor: String,
    category: Category,
    swipes: usize,
    accept_ratio: f64,
) -> Result<()> {
    if !(0.0..=1.0).contains(&accept_ratio) {
        bail!("--accept-ratio must be between 0 and 1, got {accept_ratio}");
    }

    let directions: Vec<Direction> = {
        let mut rng = rand::rng();
        (0..swipes)
            .map(|_| {
                if rng.random_bool(accept_ratio) {
                    Direction::Right
                } else {
                    Direction::Left
                }
            })
            .collect()
    };

    let session = engine.session(actor, category);
    let start = Instant::now();
    print_refill(&session.load().await);

    let mut timings = Vec::with_capacity(swipes);
    let (mut accepted, mut rejected, mut ignored, mut refills) = (0usize, 0usize, 0usize, 0usize);

    for direction in directions {
        if session.window().is_empty() {
            match session.refill_if_exhausted().await {
                RefillOutcome::Loaded { .. } => refills += 1,
                other => {
                    print_refill(&other);
                    break;
                }
            }
        }

        let decided_at = Instant::now();
        match session.decide(direction).await? {
            DecideOutcome::Recorded(_) => match direction {
                Direction::Right => accepted += 1,
                Direction::Left => rejected += 1,
            },
            DecideOutcome::Ignored(_) => ignored += 1,
        }
        timings.push(decided_at.elapsed());
    }

    let total_time = start.elapsed();
    println!("{}", "Simulation results:".bold().blue());
    println!("Decisions: {} ({} right, {} left)", accepted + rejected, accepted, rejected);
    println!("Ignored: {}", ignored);
    println!("Refills: {}", refills);
    println!("Total time: {:?}", total_time);
    if !timings.is_empty() {
        let avg = timings.iter().sum::<Duration>() / timings.len() as u32;
        timings.sort();
        println!("Average decision latency: {:?}", avg);
        println!("P50 decision latency: {:?}", timings[timings.len() / 2]);
        println!(
            "Max decision latency: {:?}",
            timings[timings.len() - 1]
        );
    }
    Ok(())
}

fn print_refill(outcome: &RefillOutcome) {
    match outcome {
        RefillOutcome::Loaded { items, origin } => {
            println!("{} Loaded {} items ({:?})", "✓".green(), items, origin);
        }
        RefillOutcome::NoMoreItems => {
            println!(
                "{} No more items. Type 'refill' to check again.",
                "∅".yellow()
            );
        }
        RefillOutcome::Superseded => println!("{} Load superseded", "…".yellow()),
        RefillOutcome::InFlight => println!("{} Load already in progress", "…".yellow()),
        RefillOutcome::NotNeeded | RefillOutcome::NotYetLoaded => {}
    }
}

fn print_window(session: &SwipeSession) {
    let window = session.window();
    if window.is_empty() {
        if session.no_more_items() {
            println!("  (no more items)");
        }
        return;
    }
    for (depth, item) in window.iter().enumerate() {
        let marker = if depth == 0 { "▶".bold() } else { " ".normal() };
        println!("{} {}", marker, describe(item));
    }
}

fn describe(item: &PoolItem) -> String {
    format!("[{}] {}", item.id().cyan(), item.headline())
}

fn direction_arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "←",
        Direction::Right => "→",
    }
}
