use crate::args::Cli;
use crate::config::{CONFIG_FILE, Config, expand_tilde, resolve_data_dir, resolve_log_root};
use crate::console::ConsoleTerminal;
use anyhow::Result;
use eventy_engine::{
    Bound, Error as EngineError, QueryConfig, QueryEngine, Reporter, max_entries_from, parse_level,
    parse_time_bound,
};
use eventy_source::JournalSource;

/// Run one invocation.
///
/// Only configuration problems come back as `Err`; query failures are
/// reported through the console and the run still succeeds.
pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config = Config::load_from(&data_dir.join(CONFIG_FILE))?;
    let query = build_query(&cli, &config)?;

    let source = JournalSource::new(resolve_log_root(cli.log_root.as_deref(), &config, &data_dir));
    let mut terminal = ConsoleTerminal::new(cli.color);
    let mut reporter = Reporter::new(&mut terminal, cli.log_level.into());

    reporter.trace(format!("Log root: {}", source.root().display()));

    match QueryEngine::new(&source).run(&query, &mut reporter) {
        Ok(_) => Ok(()),
        Err(err @ EngineError::Configuration(_)) => Err(err.into()),
        Err(err) => {
            reporter.error(err.to_string());
            Ok(())
        }
    }
}

/// Translate parsed arguments into a validated query
pub fn build_query(cli: &Cli, config: &Config) -> Result<QueryConfig> {
    let mut query = QueryConfig {
        reverse_direction: cli.reverse,
        search_terms: cli.search.clone(),
        search_must_match_all: cli.all,
        export_path: cli.export.as_deref().map(expand_tilde),
        ..Default::default()
    };

    match (cli.log_name.as_deref(), cli.record_id.as_deref()) {
        (Some(id), None) if is_record_id(id) => {
            query.record_id = Some(parse_record_id(id)?);
        }
        (log_name, record_id) => {
            query.log_name = log_name.map(str::to_string);
            query.record_id = record_id.map(parse_record_id).transpose()?;
        }
    }

    query.max_entries = match cli.max.as_deref() {
        Some(value) => max_entries_from(
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| EngineError::configuration(format!("invalid --max value '{}'", value)))?,
        ),
        None => max_entries_from(config.max_entries),
    };

    if let Some(from) = &cli.from {
        query.query_from = Some(parse_time_bound(from, Bound::From)?);
    }
    if let Some(to) = &cli.to {
        query.query_to = Some(parse_time_bound(to, Bound::To)?);
    }

    for level in &cli.levels {
        query.log_levels.extend(parse_level(level)?);
    }

    query.validate()?;
    Ok(query)
}

fn is_record_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_record_id(value: &str) -> Result<i64> {
    let record_id = value
        .trim()
        .parse::<i64>()
        .map_err(|_| EngineError::configuration(format!("invalid record id '{}'", value)))?;
    Ok(record_id)
}
