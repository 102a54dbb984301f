use std::{error::Error, fs::File, io::BufWriter, path::PathBuf, process::exit};

use clap::{Args, Parser, Subcommand};
use comfy_table::{Cell, Table};
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker_rs::{
    COLUMNS, DateRange, HistoryCache, JsonFileSource, PageLink, Period, SortKey, SortState,
    Timeframe, TransactionRecord, TransactionTable, TransactionType, UserSettings,
    category_breakdown, derive_rows, filter_rows, format_amount, history_data, history_periods,
    overview, write_csv,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Browse, export and summarise income and expense transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File path to a JSON array of transactions.
    #[arg(long)]
    data: PathBuf,

    /// File path to the user settings JSON file.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// The first day to load, e.g. 2025-01-01. Defaults to 90 days before `--to`.
    #[arg(long, value_parser = parse_date)]
    from: Option<Date>,

    /// The last day to load, e.g. 2025-03-31. Defaults to today.
    #[arg(long, value_parser = parse_date)]
    to: Option<Date>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of the transaction table.
    List {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Write every transaction that passes the filters to a CSV file.
    Export {
        #[command(flatten)]
        table: TableArgs,

        /// File path to write the CSV document to.
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Print totals, category breakdowns and history.
    Stats {
        /// Bucket history per day of a month or per month of a year.
        #[arg(long, default_value_t = Timeframe::Month)]
        timeframe: Timeframe,

        /// The year to show history for. Defaults to the year of `--to`.
        #[arg(long)]
        year: Option<i32>,

        /// The month to show history for, from 1 to 12. Defaults to the month of `--to`.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: Option<u8>,
    },
}

/// The table controls shared by `list` and `export`.
#[derive(Args, Debug)]
struct TableArgs {
    /// Only show transactions containing this text.
    #[arg(long)]
    search: Option<String>,

    /// Only show transactions in this category. May be repeated.
    #[arg(long)]
    category: Vec<String>,

    /// Only show transactions of this type, `income` or `expense`. May be repeated.
    #[arg(long = "type")]
    kind: Vec<String>,

    /// Sort by a column, e.g. `amount:desc`. May be repeated, most significant first.
    #[arg(long)]
    sort: Vec<SortKey>,

    /// The page to show, starting from 1.
    #[arg(long, default_value_t = 1)]
    page: usize,
}

impl TableArgs {
    fn apply(&self, table: &mut TransactionTable, records: &[TransactionRecord], currency: &str) {
        if let Some(search) = &self.search {
            table.set_search(search);
        }

        table.set_column_filter("category", self.category.iter().cloned());
        table.set_column_filter("type", self.kind.iter().cloned());
        table.set_sort(SortState::from_keys(self.sort.clone()));
        table.go_to_page(self.page.saturating_sub(1), records, currency);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => UserSettings::load(path)?,
        None => UserSettings::default(),
    };

    let today = OffsetDateTime::now_utc().date();
    let to = cli.to.unwrap_or(today);
    let range = match cli.from {
        Some(from) => DateRange::new(from, to),
        None => Ok(DateRange::ending_on(to)),
    };
    let range = match range {
        Ok(range) => range,
        Err(error) => {
            eprintln!("{error}");
            exit(1);
        }
    };

    let source = JsonFileSource::new(&cli.data);
    let mut cache = HistoryCache::new();
    let records = cache.load(&source, range)?;

    match cli.command {
        Command::List { table } => list(records, &table, &settings.currency),
        Command::Export { table, output } => {
            export(records, &table, &settings.currency, output)?
        }
        Command::Stats {
            timeframe,
            year,
            month,
        } => {
            let mut period = Period::containing(to);

            if let Some(year) = year {
                period.year = year;
            }

            if let Some(month) = month {
                period.month = month.try_into()?;
            }

            stats(records, timeframe, period, &settings.currency);
        }
    }

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text, DATE_FORMAT)
        .map_err(|error| format!("expected a date like 2025-01-31: {error}"))
}

fn list(records: &[TransactionRecord], args: &TableArgs, currency: &str) {
    let mut transaction_table = TransactionTable::new();
    args.apply(&mut transaction_table, records, currency);
    let view = transaction_table.render(records, currency);

    let mut table = Table::new();
    table.set_header(COLUMNS.iter().map(|column| column.title).collect::<Vec<_>>());

    for row in &view.visible_rows {
        table.add_row(
            COLUMNS
                .iter()
                .map(|column| Cell::new((column.renderer)(row)))
                .collect::<Vec<_>>(),
        );
    }

    println!("{table}");

    if view.visible_rows.is_empty() {
        println!("No transactions found.");
    }

    println!(
        "Page {} of {} ({} of {} transactions)",
        view.page_index + 1,
        view.page_count,
        view.filtered_count,
        view.total_count
    );
    println!("{}", format_page_links(&view.page_links));

    let categories = view
        .facets
        .categories
        .iter()
        .map(|option| option.label.as_str())
        .collect::<Vec<_>>();
    let types = view
        .facets
        .types
        .iter()
        .map(|option| option.value.as_str())
        .collect::<Vec<_>>();
    println!("Categories: {}", categories.join(", "));
    println!("Types: {}", types.join(", "));
}

fn format_page_links(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(page) => format!("{}", page + 1),
            PageLink::Current(page) => format!("[{}]", page + 1),
            PageLink::Ellipsis => "...".to_owned(),
            PageLink::Next(_) => "Next >".to_owned(),
            PageLink::Previous(_) => "< Prev".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn export(
    records: &[TransactionRecord],
    args: &TableArgs,
    currency: &str,
    output: PathBuf,
) -> Result<(), Box<dyn Error>> {
    let mut transaction_table = TransactionTable::new();
    args.apply(&mut transaction_table, records, currency);

    let rows = derive_rows(records, currency);
    let filtered = filter_rows(&rows, &transaction_table.state().filter);

    let file = File::create(&output)?;
    write_csv(&filtered, BufWriter::new(file))?;

    println!("Exported {} transactions to {output:#?}", filtered.len());

    Ok(())
}

fn stats(records: &[TransactionRecord], timeframe: Timeframe, period: Period, currency: &str) {
    let totals = overview(records);

    let mut table = Table::new();
    table.set_header(vec!["Transactions", "Income", "Expenses", "Net"]);
    table.add_row(vec![
        Cell::new(totals.transaction_count),
        Cell::new(format_amount(totals.income, currency)),
        Cell::new(format_amount(totals.expense, currency)),
        Cell::new(signed_amount(totals.net, currency)),
    ]);
    println!("Overview\n{table}");

    for kind in TransactionType::ALL {
        let mut table = Table::new();
        table.set_header(vec!["Category", "Total", "Share"]);

        for total in category_breakdown(records, kind) {
            table.add_row(vec![
                Cell::new(format!("{} {}", total.icon, total.category)),
                Cell::new(format_amount(total.total, currency)),
                Cell::new(format!("{:.1}%", total.percent)),
            ]);
        }

        println!("{} by category\n{table}", kind.label());
    }

    let mut table = Table::new();
    table.set_header(vec!["Period", "Income", "Expenses"]);

    for point in history_data(records, timeframe, period) {
        let label = match point.day {
            Some(day) => format!("{}-{:02}-{:02}", point.year, point.month, day),
            None => format!("{}-{:02}", point.year, point.month),
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_amount(point.income, currency)),
            Cell::new(format_amount(point.expense, currency)),
        ]);
    }

    println!("History by {timeframe}\n{table}");

    let years = history_periods(records, period.year)
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>();
    println!("Years with transactions: {}", years.join(", "));
}

fn signed_amount(amount: f64, currency: &str) -> String {
    if amount < 0.0 {
        format!("-{}", format_amount(amount, currency))
    } else {
        format_amount(amount, currency)
    }
}
