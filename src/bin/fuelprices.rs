use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fuelprices::chart::{self, ChartOptions};
use fuelprices::settings::Settings;
use fuelprices::{
    AlignedSeries, Client, Dashboard, DateRange, FuelType, Region, align, build_snapshot, stats,
    storage,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "fuelprices",
    version,
    about = "Align, compare & chart Greek fuel prices"
)]
struct Cli {
    /// Settings file (TOML). Environment variables FUELPRICES__SECTION__KEY override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Latest price and evolution per fuel type.
    Latest(SeriesArgs),
    /// Render the visible fuel types as a chart (.svg or .png).
    Chart(ChartArgs),
    /// Per-prefecture prices of one date.
    Regions(RegionArgs),
    /// Summary statistics per fuel type.
    Stats(SeriesArgs),
    /// Write the aligned series to CSV or JSON.
    Export(ExportArgs),
    /// List the fuel types.
    FuelTypes,
    /// List the prefectures in Greek alphabetical order.
    Prefectures,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    /// Read the series from a JSON file instead of the API.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Start date (YYYY-MM-DD) of the window to fetch.
    #[arg(long)]
    start: Option<NaiveDate>,
    /// End date (YYYY-MM-DD) of the window to fetch.
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Fetch the daily series of one prefecture (e.g. ATTICA) instead of the country.
    #[arg(long)]
    prefecture: Option<String>,
    /// Fetch weekly instead of daily country data.
    #[arg(long, default_value_t = false)]
    weekly: bool,
    /// Fuel types to hide, separated by comma (e.g. DIESEL,GAS).
    #[arg(long)]
    hide: Option<String>,
    /// Fuel types to show even if hidden by default (e.g. SUPER).
    #[arg(long)]
    show: Option<String>,
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[command(flatten)]
    series: SeriesArgs,
    /// Output path (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    title: Option<String>,
    /// TrueType font for labels.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RegionArgs {
    /// Read the payload from a JSON file instead of the API.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Date (YYYY-MM-DD) to fetch; also labels a payload read from file.
    #[arg(short = 'd', long)]
    date: Option<NaiveDate>,
    /// Fuel types to hide, separated by comma.
    #[arg(long)]
    hide: Option<String>,
    /// Fuel types to show even if hidden by default.
    #[arg(long)]
    show: Option<String>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    series: SeriesArgs,
    /// Output file (format inferred by --format or extension).
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.3}"),
        _ => "NA".to_string(),
    }
}

fn parse_fuel_types(s: Option<&str>) -> Result<Vec<FuelType>> {
    s.unwrap_or_default()
        .split([',', ';'])
        .map(|x| x.trim().to_ascii_uppercase())
        .filter(|x| !x.is_empty())
        .map(|x| x.parse::<FuelType>().map_err(anyhow::Error::from))
        .collect()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    match cli.cmd {
        Command::Latest(args) => cmd_latest(&settings, args),
        Command::Chart(args) => cmd_chart(&settings, args),
        Command::Regions(args) => cmd_regions(&settings, args),
        Command::Stats(args) => cmd_stats(&settings, args),
        Command::Export(args) => cmd_export(&settings, args),
        Command::FuelTypes => {
            for f in FuelType::ALL {
                let default = if f.is_default_visible() { "shown" } else { "hidden" };
                println!("{:<16} {:<20} {}  {}", f.name(), f.label(), f.color(), default);
            }
            Ok(())
        }
        Command::Prefectures => {
            for r in Region::locale_order() {
                println!("{:<20} {}", r.name(), r.label());
            }
            Ok(())
        }
    }
}

fn client(settings: &Settings) -> Client {
    Client::new(
        &settings.api.base_url,
        Duration::from_secs(settings.api.timeout_secs),
    )
}

fn load_series(settings: &Settings, args: &SeriesArgs) -> Result<AlignedSeries> {
    if let Some(path) = args.input.as_ref() {
        let series = storage::load_daily_series(path)?;
        return Ok(align(&series));
    }

    let (start, end) = DateRange::resolve(args.start, args.end, settings.api.max_days, today())?;
    let client = client(settings);
    let raw = match (args.prefecture.as_deref(), args.weekly) {
        (Some(p), _) => {
            let region: Region = p.to_ascii_uppercase().parse()?;
            client.fetch_daily_prefecture(region, start, end)?
        }
        (None, true) => client.fetch_weekly_country(start, end)?,
        (None, false) => client.fetch_daily_country(start, end)?,
    };
    log::info!("fetched {} records for {start}..{end}", raw.len());
    fuelprices::align::align_raw(&raw).context("invalid series payload")
}

/// Apply configured and command-line selections after a load.
fn apply_selection(
    dashboard: &mut Dashboard,
    settings: &Settings,
    hide: Option<&str>,
    show: Option<&str>,
) -> Result<()> {
    for f in settings.hidden_fuel_types()? {
        dashboard.set_selected(f, false);
    }
    for f in parse_fuel_types(hide)? {
        dashboard.set_selected(f, false);
    }
    for f in parse_fuel_types(show)? {
        dashboard.set_selected(f, true);
    }
    Ok(())
}

fn dashboard_for(settings: &Settings, args: &SeriesArgs) -> Result<Dashboard> {
    let mut dashboard = Dashboard::new();
    dashboard.load_series(load_series(settings, args)?);
    apply_selection(
        &mut dashboard,
        settings,
        args.hide.as_deref(),
        args.show.as_deref(),
    )?;
    Ok(dashboard)
}

fn cmd_latest(settings: &Settings, args: SeriesArgs) -> Result<()> {
    let dashboard = dashboard_for(settings, &args)?;
    match dashboard.series().dates().last() {
        Some(date) => println!("{}", date.format("%d/%m/%Y")),
        None => eprintln!("No data in the selected window"),
    }
    for row in dashboard.latest().iter().filter(|r| r.visible) {
        println!(
            "{:<20} {:>10} {:>8}",
            row.label, row.price_text, row.evolution_text
        );
    }
    Ok(())
}

fn cmd_chart(settings: &Settings, args: ChartArgs) -> Result<()> {
    let dashboard = dashboard_for(settings, &args.series)?;
    let options = ChartOptions {
        width: args.width.unwrap_or(settings.chart.width),
        height: args.height.unwrap_or(settings.chart.height),
        title: args.title.unwrap_or_else(|| settings.chart.title.clone()),
        font_path: args.font.or_else(|| settings.chart.font_path.clone()),
    };
    chart::render_chart(
        dashboard.series(),
        dashboard.visibility(),
        &args.out,
        &options,
    )?;
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}

fn cmd_regions(settings: &Settings, args: RegionArgs) -> Result<()> {
    let (payload, date) = match args.input.as_ref() {
        Some(path) => (
            storage::load_region_payload(path)?,
            args.date.unwrap_or_else(today),
        ),
        None => {
            let date = args.date.unwrap_or_else(today);
            (client(settings).fetch_country(date)?, date)
        }
    };
    let table = build_snapshot(&payload).context("invalid region payload")?;

    // visibility follows the national average of that date
    let mut dashboard = Dashboard::new();
    dashboard.load_series(align(&table.country_series(date)?));
    dashboard.load_snapshot(table);
    apply_selection(
        &mut dashboard,
        settings,
        args.hide.as_deref(),
        args.show.as_deref(),
    )?;

    let Some(view) = dashboard.regions() else {
        return Ok(());
    };
    println!("{}", date.format("%d/%m/%Y"));
    let line = |label: &str, cells: &[String]| {
        let cells: Vec<String> = cells.iter().map(|c| format!("{c:>18}")).collect();
        println!("{:<26}{}", label, cells.join(""));
    };
    line(view.header[0].as_str(), &view.header[1..]);
    line(view.country.label, &view.country.cells);
    line(
        "",
        &view
            .stations
            .iter()
            .map(|s| if s.is_empty() { s.clone() } else { format!("({s})") })
            .collect::<Vec<_>>(),
    );
    for row in &view.rows {
        line(row.label, &row.cells);
    }
    Ok(())
}

fn cmd_stats(settings: &Settings, args: SeriesArgs) -> Result<()> {
    let dashboard = dashboard_for(settings, &args)?;
    for s in stats::fuel_type_summary(dashboard.series()) {
        if !dashboard.visibility().is_visible(s.fuel_type) {
            continue;
        }
        println!(
            "{:<20} count={} missing={}  min={} max={} mean={} median={}",
            s.fuel_type.label(),
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }
    Ok(())
}

fn cmd_export(settings: &Settings, args: ExportArgs) -> Result<()> {
    let series = load_series(settings, &args.series)?;
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => args
            .out
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(&series, &args.out)?,
        "json" => storage::save_json(&series, &args.out)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} dates to {}", series.len(), args.out.display());
    Ok(())
}
