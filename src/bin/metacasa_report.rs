use std::{env, fs, path::PathBuf, process};

use metacasa_core::{
    config::{Config, ConfigManager},
    core::{
        clock::{Clock, FixedClock, SystemClock},
        services::{RecurrenceService, SortKey, TransactionFilter},
    },
    domain::{common::parse_day, FinanceBook, Period},
    export,
    init,
    report::{Formatter, Report},
    storage::json_backend::{load_book_from_path, save_book_to_path},
    utils::build_info,
};

struct Options {
    book: PathBuf,
    period: Option<Period>,
    export: Option<PathBuf>,
    apply_recurring: bool,
    plain: bool,
}

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(options) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };

    let clock = resolve_clock()?;
    let config = load_config();
    let mut book: FinanceBook = load_book_from_path(&options.book)?;

    if options.apply_recurring {
        let emitted = RecurrenceService::run_due(&mut book, clock.today(), clock.as_ref());
        if emitted > 0 {
            save_book_to_path(&book, &options.book)?;
        }
        println!("Movimientos recurrentes generados: {emitted}");
    }

    let period = options
        .period
        .unwrap_or_else(|| Period::from_date(clock.today()));
    let report = Report::build(&book, period, clock.as_ref(), &config);
    print!("{}", Formatter::new(options.plain).render(&report));

    if let Some(path) = options.export {
        let filter = TransactionFilter::all_periods().sorted_by(SortKey::DateDesc);
        let rows = filter.apply(&book.transactions);
        let csv = export::to_csv_string(rows)?;
        fs::write(&path, csv)?;
        println!("Exportado: {}", path.display());
    }
    Ok(())
}

fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> Result<Option<Options>, Box<dyn std::error::Error>> {
    let mut book = None;
    let mut period = None;
    let mut export = None;
    let mut apply_recurring = false;
    let mut plain = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("{}", build_info::current().banner());
                return Ok(None);
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--period" => {
                let raw = args.next().ok_or("--period needs a YYYY-MM value")?;
                period = Some(Period::parse(&raw).ok_or_else(|| format!("invalid period `{raw}`"))?);
            }
            "--export" => {
                let raw = args.next().ok_or("--export needs a file path")?;
                export = Some(PathBuf::from(raw));
            }
            "--apply-recurring" => apply_recurring = true,
            "--plain" => plain = true,
            other if other.starts_with('-') => return Err(format!("unknown option `{other}`").into()),
            other => {
                if book.replace(PathBuf::from(other)).is_some() {
                    return Err("only one book file can be given".into());
                }
            }
        }
    }

    let Some(book) = book else {
        print_usage();
        return Err("missing book file".into());
    };
    Ok(Some(Options {
        book,
        period,
        export,
        apply_recurring,
        plain,
    }))
}

fn resolve_clock() -> Result<Box<dyn Clock>, Box<dyn std::error::Error>> {
    match env::var("METACASA_TODAY") {
        Ok(raw) => {
            let today = parse_day(&raw).ok_or_else(|| format!("invalid METACASA_TODAY `{raw}`"))?;
            Ok(Box::new(FixedClock::new(today)))
        }
        Err(_) => Ok(Box::new(SystemClock)),
    }
}

fn load_config() -> Config {
    match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to default config");
            Config::default()
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: metacasa_report <book.json> [--period YYYY-MM] [--export out.csv] [--apply-recurring] [--plain]"
    );
}
