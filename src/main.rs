//! bikestat - Explore US bikeshare trip data from local CSV files

use bikestat::{
    aggregation::SummaryReport,
    cli::Cli,
    data_loader::DataLoader,
    error::Result,
    filters::{FilterSummary, TripFilter},
    output::{OutputFormatter, TableFormatter, get_formatter},
    pagination::Paginator,
    prompt::Prompter,
    types::City,
};
use clap::Parser;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bikestat=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let loader = DataLoader::new().with_data_dir(&cli.data_dir);

    match cli.city {
        Some(city) => run_once(&loader, city, &cli),
        None => {
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout();
            run_interactive(&loader, Prompter::new(stdin, stdout))
        }
    }
}

/// One-shot mode: report for the city/month/day flags, then exit
fn run_once(loader: &DataLoader, city: City, cli: &Cli) -> Result<()> {
    info!("running one-shot report for {city}");

    let mut filter = TripFilter::new();
    if let Some(month) = cli.month.to_month() {
        filter = filter.with_month(month);
    }
    if let Some(weekday) = cli.day.to_weekday() {
        filter = filter.with_weekday(weekday);
    }

    let table = loader.load_city(city)?;
    let view = filter.apply(&table);
    let report = SummaryReport::from_view(&view);

    let formatter = get_formatter(cli.json);
    println!(
        "{}",
        formatter.format_summary(city, &FilterSummary::from(&filter), &report)
    );
    Ok(())
}

/// Interactive mode: prompt for filters, report, paginate, restart
fn run_interactive<R: BufRead, W: Write>(
    loader: &DataLoader,
    mut prompter: Prompter<R, W>,
) -> Result<()> {
    prompter.say("Hello! Let's explore some US bikeshare data!")?;

    loop {
        // EOF at any prompt ends the session cleanly
        let Some(city) = prompter.city()? else { break };
        let Some(month) = prompter.month()? else {
            break;
        };
        let Some(weekday) = prompter.weekday()? else {
            break;
        };

        let mut filter = TripFilter::new();
        if let Some(month) = month {
            filter = filter.with_month(month);
        }
        if let Some(weekday) = weekday {
            filter = filter.with_weekday(weekday);
        }

        let summary = FilterSummary::from(&filter);
        prompter.say(&format!(
            "\nYou will see data filtered by:\ncity name: {city}\nmonth: {}\nweekday: {}\n{}",
            summary.month,
            summary.weekday,
            "-".repeat(40)
        ))?;

        // A missing or malformed dataset is fatal for this iteration only;
        // the restart prompt still runs.
        match loader.load_city(city) {
            Ok(table) => {
                let started = Instant::now();
                let view = filter.apply(&table);
                let report = SummaryReport::from_view(&view);
                debug!(elapsed = ?started.elapsed(), "computed summary report");

                let formatter = TableFormatter::new();
                prompter.say(&formatter.format_summary(city, &summary, &report))?;

                let mut pager = Paginator::new();
                let mut question = "\nWould you like to see raw trip data? Enter yes or no.";
                while prompter.confirm(question)? {
                    let page = pager.next_page(view.rows());
                    if page.is_empty() {
                        prompter.say("No more raw data to show.")?;
                        break;
                    }
                    prompter.say(&formatter.format_rows(page))?;
                    question = "\nWould you like to see more raw trip data? Enter yes or no.";
                }
            }
            Err(e) => {
                error!("failed to load dataset: {e}");
                prompter.say(&format!("Could not load data: {e}"))?;
            }
        }

        if !prompter.confirm("\nWould you like to restart? Enter yes or no.")? {
            break;
        }
    }

    Ok(())
}
