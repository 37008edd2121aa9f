use anyhow::{Context, Result};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use colored::Colorize;
use enricher::{Enricher, HttpTitleLookup, LookupOutcome, MemoryLookupLog};
use ranker::EnrichedCandidate;
use server::Recommender;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// genre-recs - genre-based movie recommendations
#[derive(Parser)]
#[command(name = "genre-recs")]
#[command(about = "Recommends movies matching your favorite genres", long_about = None)]
struct Cli {
    /// Path to the movie catalog (title column + binary genre columns)
    #[arg(short, long, default_value = "data/movies.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get recommendations for a set of favorite genres
    Recommend {
        /// Favorite genres, comma-separated (e.g. action,crime)
        #[arg(long, value_delimiter = ',', required = true)]
        genres: Vec<String>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = ranker::DEFAULT_TOP_N)]
        top_n: usize,

        /// Skip metadata enrichment and keep similarity order
        #[arg(long)]
        no_enrich: bool,

        /// Base URL of the title-lookup service
        #[arg(long, default_value = "http://localhost:9000/")]
        lookup_url: String,

        /// API key for the title-lookup service, if it needs one
        #[arg(long)]
        api_key: Option<String>,

        /// Maximum concurrent enrichment lookups
        #[arg(long, default_value = "4")]
        fan_out: usize,

        /// Per-title lookup timeout in seconds
        #[arg(long, default_value = "4")]
        timeout_secs: u64,

        /// Dump the lookup log after the results
        #[arg(long)]
        show_log: bool,
    },

    /// List the genre axes the catalog supports
    Genres,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog once; everything downstream shares it read-only
    println!("Loading movie catalog from {}...", cli.data.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.data).context("Failed to load movie catalog")?,
    );
    println!(
        "{} Loaded {} movies across {} genres in {:?}",
        "✓".green(),
        catalog.len(),
        catalog.schema().len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            genres,
            top_n,
            no_enrich,
            lookup_url,
            api_key,
            fan_out,
            timeout_secs,
            show_log,
        } => {
            handle_recommend(
                catalog,
                genres,
                top_n,
                no_enrich,
                lookup_url,
                api_key,
                fan_out,
                timeout_secs,
                show_log,
            )
            .await?
        }
        Commands::Genres => handle_genres(&catalog),
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<Catalog>,
    genres: Vec<String>,
    top_n: usize,
    no_enrich: bool,
    lookup_url: String,
    api_key: Option<String>,
    fan_out: usize,
    timeout_secs: u64,
    show_log: bool,
) -> Result<()> {
    let log = Arc::new(MemoryLookupLog::default());
    let lookup = HttpTitleLookup::new(&lookup_url, api_key)
        .context("Failed to configure the title-lookup client")?;
    let enricher = Enricher::new(Arc::new(lookup), log.clone())
        .with_lookup_timeout(Duration::from_secs(timeout_secs));
    let recommender = Recommender::new(catalog, enricher).with_fan_out(fan_out);

    let recommendations = match recommender.recommend(&genres, top_n, !no_enrich).await {
        Ok(list) => list,
        Err(err) => {
            // Validation failures are user-correctable input errors
            eprintln!("{} {}", "✗".red(), err);
            std::process::exit(2);
        }
    };

    print_recommendations(&recommendations);
    if show_log {
        print_lookup_log(&log);
    }
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(catalog: &Catalog) {
    println!("{}", "Available genres:".bold().blue());
    for name in catalog.schema().names() {
        println!("{}{}", "• ".green(), name);
    }
}

/// Helper function to format and print the final ranked list
fn print_recommendations(recommendations: &[EnrichedCandidate]) {
    if recommendations.is_empty() {
        println!("{}", "No recommendations found (empty catalog?)".yellow());
        return;
    }

    println!("{}", "Top Recommendations:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        let rating = rec
            .rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}. {} (similarity {:.2}, rating {})",
            (i + 1).to_string().green(),
            rec.candidate.title.bold(),
            rec.candidate.similarity,
            rating
        );
        println!("   {}", rec.description);
        if let Some(poster) = &rec.poster_url {
            println!("   Poster: {poster}");
        }
        if let Some(link) = &rec.source_link {
            println!("   More: {link}");
        }
        if !rec.lookup_succeeded {
            println!("   {}", "(no metadata found)".dimmed());
        }
    }
}

/// Dump the observability log collected during enrichment
fn print_lookup_log(log: &MemoryLookupLog) {
    println!("{}", "Lookup log:".bold().blue());
    for entry in log.snapshot() {
        match entry.outcome {
            LookupOutcome::Enriched { rating, has_poster } => {
                let rating = rating
                    .map(|r| format!("{r:.1}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  {} {} (rating {}, poster: {})",
                    "✓".green(),
                    entry.title,
                    rating,
                    if has_poster { "yes" } else { "no" }
                );
            }
            LookupOutcome::Failed { reason } => {
                println!("  {} {} ({})", "✗".red(), entry.title, reason);
            }
        }
    }
}
