//! IV Tracker CLI
//!
//! Fetches IV history for a two-leg calendar pair and prints the aligned
//! table plus the spread metrics.
//!
//! Usage: iv-tracker <TICKER> <STRIKE> <SHORT_EXP> <LONG_EXP> <START> [END]
//! Dates are YYYY-MM-DD; END defaults to today. Reads ORATS_TOKEN from the
//! environment.

use chrono::{NaiveDate, Utc};
use iv_tracker::prelude::*;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> IvResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 5 {
        return Err(IvError::invalid_input(
            "usage: iv-tracker <TICKER> <STRIKE> <SHORT_EXP> <LONG_EXP> <START> [END]",
        ));
    }

    let ticker = args[0].to_uppercase();
    let strike: f64 = args[1]
        .parse()
        .map_err(|_| IvError::invalid_input(format!("bad strike: {}", args[1])))?;
    let short_exp = parse_date(&args[2])?;
    let long_exp = parse_date(&args[3])?;
    let start = parse_date(&args[4])?;
    let end = match args.get(5) {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let token = std::env::var("ORATS_TOKEN")
        .map_err(|_| IvError::invalid_input("ORATS_TOKEN environment variable is not set"))?;

    let legs = vec![
        OptionLeg::new(strike, short_exp, OptionType::Call),
        OptionLeg::new(strike, long_exp, OptionType::Call),
    ];

    println!("IV Tracker");
    println!("==========\n");
    println!("Ticker: {}", ticker);
    for leg in &legs {
        println!("Leg: {}", leg);
    }
    println!("Range: {} to {}\n", start, end);

    let client = OratsClient::new(token)?;
    let fetcher = HistoryFetcher::new(client);
    let outcome = fetcher.fetch(&ticker, &legs, start, end)?;

    for warning in &outcome.warnings {
        println!("warning: {}", warning);
    }

    print_table(&outcome.table);
    print_metrics(&outcome.table);

    Ok(())
}

fn parse_date(s: &str) -> IvResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| IvError::invalid_input(format!("bad date (want YYYY-MM-DD): {}", s)))
}

fn print_table(table: &AlignedTable) {
    println!("\nAligned IV (%):");
    print!("{:<12}", "date");
    for col in table.columns() {
        print!("  {:>14}", col.leg.label());
    }
    println!();

    for (row, date) in table.dates().iter().enumerate() {
        print!("{:<12}", date.to_string());
        for col in table.columns() {
            match col.values[row] {
                Some(iv) => print!("  {:>14.2}", iv),
                None => print!("  {:>14}", "-"),
            }
        }
        println!();
    }
}

fn print_metrics(table: &AlignedTable) {
    println!("\nPer-leg delta:");
    for d in leg_deltas(table) {
        println!(
            "  {}: {:.2} -> {:.2}  (delta {:+.2}, {:+.2}%)",
            d.leg,
            d.start_iv,
            d.end_iv,
            d.delta(),
            d.pct_delta()
        );
    }

    match CalendarMetrics::compute(table) {
        Ok(m) => {
            println!("\nCalendar spread ({} / {}):", m.short(), m.long());
            println!("  DTE at entry: short {}, long {}", m.dte_short, m.dte_long);
            print_metric("IV crush", m.iv_crush, m.crush_band().map(|b| b.label()));
            print_metric("IV ratio", m.iv_ratio, m.ratio_band().map(|b| b.label()));
            print_metric("IV spread", m.iv_spread, m.spread_band().map(|b| b.label()));
            print_metric("IV slope", m.iv_slope, m.slope_band().map(|b| b.label()));
        }
        Err(e) => println!("\nCalendar metrics unavailable: {}", e),
    }
}

fn print_metric(name: &str, value: f64, interpretation: Option<&'static str>) {
    match interpretation {
        Some(text) => println!("  {:<10} {:>8.4}   {}", name, value, text),
        None => println!("  {:<10} {:>8}   (undefined)", name, "NaN"),
    }
}
