mod config;
mod notify;
mod parser;
mod scraper;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::{Duration, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "celcat_notify",
    about = "Celcat timetable day notifier via spider.cloud + Discord"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the rendered week view for the target day and print it
    Fetch {
        /// Target day (default: tomorrow in the configured timezone)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Parse a saved week-view text blob and print the day's events
    Parse {
        /// Text blob previously captured with `fetch`
        file: PathBuf,
        /// Target day (default: tomorrow, local time)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Building prefix the site lists rooms under
        #[arg(short, long, default_value = parser::DEFAULT_ROOM_MARKER)]
        marker: String,
    },
    /// Fetch, parse and post the day's events to Discord
    Run {
        /// Target day (default: tomorrow in the configured timezone)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Print the webhook payload instead of posting it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch { date } => {
            let cfg = config::Config::from_env()?;
            let day = target_date(date, cfg.timezone);
            let url = scraper::week_url_for(&cfg.list_url, day)?;
            let text = scraper::fetch_week_text(&url).await?;
            println!("{text}");
            Ok(())
        }
        Commands::Parse { file, date, marker } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let day =
                date.unwrap_or_else(|| Local::now().date_naive() + Duration::days(1));
            let profile = parser::Profile::new(&marker, parser::DEFAULT_KIND_KEYWORDS);
            let events = parser::select_day(&parser::parse_week(&text, &profile), day);
            print_day_table(day, &events);
            Ok(())
        }
        Commands::Run { date, dry_run } => {
            let cfg = config::Config::from_env()?;
            let day = target_date(date, cfg.timezone);
            let url = scraper::week_url_for(&cfg.list_url, day)?;
            let text = scraper::fetch_week_text(&url).await?;

            let profile = parser::Profile::new(&cfg.room_marker, parser::DEFAULT_KIND_KEYWORDS);
            let events = parser::select_day(&parser::parse_week(&text, &profile), day);
            print_day_table(day, &events);

            let payload = notify::build_payload(&events, day, &url, Utc::now());
            if dry_run {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                notify::post(&cfg.webhook_url, &payload).await?;
                println!("Posted to Discord.");
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Tomorrow in `tz` unless the user pinned a day.
fn target_date(cli_date: Option<NaiveDate>, tz: Tz) -> NaiveDate {
    cli_date.unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive() + Duration::days(1))
}

fn print_day_table(day: NaiveDate, events: &[parser::Event]) {
    if events.is_empty() {
        println!("No events on {day}.");
        return;
    }

    println!(
        "{:>2} | {:<13} | {:<36} | {:<20} | {:<24}",
        "#", "Horaires", "Titre", "Salle", "Enseignants"
    );
    println!("{}", "-".repeat(105));

    for (i, e) in events.iter().enumerate() {
        println!(
            "{:>2} | {:<13} | {:<36} | {:<20} | {:<24}",
            i + 1,
            format!("{}–{}", e.start, e.end),
            truncate(&e.title, 36),
            truncate(e.room.as_deref().unwrap_or("-"), 20),
            truncate(e.teachers.as_deref().unwrap_or("-"), 24),
        );
    }

    println!("\n{} events on {}", events.len(), day);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
