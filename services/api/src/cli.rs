use crate::infra::{parse_date, InMemoryCatalog};
use crate::render::{browse_lines, strategy_lines};
use crate::server;
use admission_match::config::AppConfig;
use admission_match::error::AppError;
use admission_match::matching::{
    CategorySelection, FilterSpec, MatchQuery, MatchService, PageSize, Preferences, SortMode,
    StrategyFilter, StrategyQuery,
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Admission Match",
    about = "Match a student's score against published admission cutoffs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print one page of ranked, filtered matches
    Browse(BrowseArgs),
    /// Print matches grouped into fit tiers
    Strategy(StrategyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Cutoff CSV export (defaults to MATCH_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Student's percentile score
    #[arg(long)]
    pub(crate) score: f64,
    /// Admission category; repeat for several, ALL lifts the restriction
    #[arg(long = "category")]
    pub(crate) categories: Vec<String>,
    /// Preferred program, most wanted first; repeatable
    #[arg(long = "prefer-program")]
    pub(crate) preferred_programs: Vec<String>,
    /// Preferred city, most wanted first; repeatable
    #[arg(long = "prefer-city")]
    pub(crate) preferred_cities: Vec<String>,
    /// Only show these cities; repeatable
    #[arg(long = "city")]
    pub(crate) cities: Vec<String>,
    /// Only show these programs; repeatable
    #[arg(long = "program")]
    pub(crate) programs: Vec<String>,
    /// Only show these institution types; repeatable
    #[arg(long = "institution-type")]
    pub(crate) institution_types: Vec<String>,
}

impl CatalogArgs {
    fn preferences(&self) -> Preferences {
        Preferences {
            programs: self.preferred_programs.clone(),
            cities: self.preferred_cities.clone(),
        }
    }

    fn categories(&self) -> CategorySelection {
        self.categories.iter().cloned().collect()
    }
}

#[derive(Args, Debug)]
pub(crate) struct BrowseArgs {
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    /// Case-insensitive text matched against institution, program, or city
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Hide matches the score does not qualify for
    #[arg(long)]
    pub(crate) eligible_only: bool,
    /// eligible, cutoff-asc, cutoff-desc, name-asc, name-desc, or city-asc
    #[arg(long, default_value_t = SortMode::Eligible)]
    pub(crate) sort: SortMode,
    /// Page to show; out-of-range values land on the nearest page
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub(crate) page: i64,
    /// Matches per page (defaults to MATCH_PAGE_SIZE)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) page_size: Option<i64>,
}

#[derive(Args, Debug)]
pub(crate) struct StrategyArgs {
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    /// Date printed on the report (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Browse(args) => run_browse(args),
        Command::Strategy(args) => run_strategy(args),
    }
}

fn load_service(
    args: &CatalogArgs,
    config: &AppConfig,
) -> Result<MatchService<InMemoryCatalog>, AppError> {
    let path = args.catalog.as_deref().or(config.catalog.path.as_deref());
    let catalog = InMemoryCatalog::load(path)?;
    Ok(MatchService::new(Arc::new(catalog), config.matching))
}

pub(crate) fn browse_query(args: &BrowseArgs) -> Result<MatchQuery, AppError> {
    let page_size = args.page_size.map(PageSize::try_from).transpose()?;

    Ok(MatchQuery {
        categories: args.catalog.categories(),
        institution_types: to_set(&args.catalog.institution_types),
        preferences: args.catalog.preferences(),
        filters: FilterSpec {
            search: args.search.clone(),
            cities: to_set(&args.catalog.cities),
            programs: to_set(&args.catalog.programs),
            categories: BTreeSet::new(),
            eligible_only: args.eligible_only,
        },
        sort: args.sort,
        page: args.page,
        page_size,
        ..MatchQuery::new(args.catalog.score)
    })
}

pub(crate) fn strategy_query(args: &StrategyArgs) -> StrategyQuery {
    StrategyQuery {
        categories: args.catalog.categories(),
        preferences: args.catalog.preferences(),
        filter: StrategyFilter {
            cities: to_set(&args.catalog.cities),
            programs: to_set(&args.catalog.programs),
            institution_types: to_set(&args.catalog.institution_types),
        },
        ..StrategyQuery::new(args.catalog.score)
    }
}

fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let query = browse_query(&args)?;
    let service = load_service(&args.catalog, &config)?;

    let result = service.browse(&query)?;
    for line in browse_lines(&result, query.student_score) {
        println!("{line}");
    }
    Ok(())
}

fn run_strategy(args: StrategyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let query = strategy_query(&args);
    let service = load_service(&args.catalog, &config)?;

    let report = service.strategy(&query)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    for line in strategy_lines(&report, today) {
        println!("{line}");
    }
    Ok(())
}

fn to_set(values: &[String]) -> BTreeSet<String> {
    values.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        let cli = Cli::try_parse_from(args.iter().copied()).expect("arguments parse");
        cli.command.expect("subcommand present")
    }

    #[test]
    fn browse_arguments_build_a_query() {
        let command = parse(&[
            "admission-match",
            "browse",
            "--score",
            "82.5",
            "--category",
            "OBC",
            "--prefer-program",
            "Computer Engineering",
            "--city",
            "Pune",
            "--sort",
            "cutoff-desc",
            "--page-size",
            "10",
        ]);
        let Command::Browse(args) = command else {
            panic!("expected browse command");
        };

        let query = browse_query(&args).expect("query builds");

        assert_eq!(query.student_score, 82.5);
        assert!(query.categories.admits("OBC"));
        assert!(!query.categories.admits("GOPEN"));
        assert_eq!(query.preferences.programs, vec!["Computer Engineering"]);
        assert!(query.filters.cities.contains("Pune"));
        assert_eq!(query.sort, SortMode::CutoffDesc);
        assert_eq!(query.page_size.map(PageSize::get), Some(10));
    }

    #[test]
    fn non_positive_page_size_is_a_query_error() {
        let command = parse(&["admission-match", "browse", "--score", "70", "--page-size", "-3"]);
        let Command::Browse(args) = command else {
            panic!("expected browse command");
        };

        match browse_query(&args) {
            Err(AppError::Query(err)) => {
                assert_eq!(err.to_string(), "page size must be a positive integer, got -3");
            }
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn negative_page_is_passed_through_for_clamping() {
        let command = parse(&["admission-match", "browse", "--score", "70", "--page", "-2"]);
        let Command::Browse(args) = command else {
            panic!("expected browse command");
        };

        let query = browse_query(&args).expect("query builds");

        assert_eq!(query.page, -2);
    }

    #[test]
    fn unknown_sort_mode_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from(["admission-match", "browse", "--score", "70", "--sort", "random"]);
        assert!(result.is_err());
    }

    #[test]
    fn strategy_arguments_build_a_filter() {
        let command = parse(&[
            "admission-match",
            "strategy",
            "--score",
            "76",
            "--institution-type",
            "Private",
            "--today",
            "2024-06-30",
        ]);
        let Command::Strategy(args) = command else {
            panic!("expected strategy command");
        };

        let query = strategy_query(&args);

        assert!(query.filter.institution_types.contains("Private"));
        assert!(query.categories.is_unrestricted());
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2024, 6, 30));
    }
}
