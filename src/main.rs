use chrono::NaiveDate;
use dotenvy::dotenv;
use stockpulse::config::Config;
use stockpulse::core::dashboard::DashboardView;
use stockpulse::services::{HttpSignalSource, SignalSource};
use stockpulse::signals::SignalCard;

/// One-shot terminal snapshot: `stockpulse [YYYY-MM-DD]`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env();
    let date = std::env::args()
        .nth(1)
        .map(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d"))
        .transpose()?;

    let source = HttpSignalSource::from_config(&config)?;
    let companies = config.company_directory()?;
    let decoded = source.fetch_signals(date).await?;
    let view = DashboardView::build(&decoded, &companies, config.default_universe.clone());

    println!("Universe: {}", view.universe);
    println!("  Total Signals:   {}", view.stats.total);
    println!("  Bullish:         {}", view.stats.bullish_count);
    println!("  Bearish:         {}", view.stats.bearish_count);
    println!("  Avg Probability: {}%", view.stats.avg_probability_pct);
    println!();

    if let Some(message) = view.empty_message {
        println!("{}", message);
    }
    for card in &view.cards {
        print_card(card);
        println!();
    }
    for rejected in &view.rejected {
        println!("Skipped record #{}: {}", rejected.index, rejected.reason);
    }

    println!("As of: {}  Horizon: {}", view.as_of, view.horizon);
    println!("This is not financial advice. Always do your own research.");

    Ok(())
}

fn print_card(card: &SignalCard) {
    println!("{} ({}) [{}]", card.symbol, card.company_name, card.trend.label);
    if let Some(price) = &card.price {
        println!("  Price: {} ({})", price, card.monthly_return.text);
    } else {
        println!("  30-day change: {}", card.monthly_return.text);
    }
    if !card.trend.description.is_empty() {
        println!("  {}", card.trend.description);
    }
    println!("  Bullish Probability: {}%", card.probability_pct);
    for metric in &card.metrics {
        match metric.band {
            Some(band) => println!("  {}: {} ({:?})", metric.label, metric.value, band),
            None => println!("  {}: {}", metric.label, metric.value),
        }
    }
    if let Some(error) = &card.error {
        println!("  ! {}", error);
    }
}
