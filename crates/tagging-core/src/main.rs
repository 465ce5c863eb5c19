use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tagging_core::{
    logging, FileTaxonomySource, Reconciler, SelectionState, Tagger, TaggingConfig, TaggingError,
    TaxonClassification, TaxonomySource,
};
use tagging_links::PublishingApiClient;
use tagging_taxonomy::{TaxonId, Taxonomy};

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFLICT: u8 = 2;

#[derive(Debug, Serialize)]
struct ShowReport<'a> {
    content_id: &'a str,
    previous_version: u64,
    #[serde(flatten)]
    classification: TaxonClassification,
    most_specific: Vec<TaxonId>,
}

fn cli() -> Command {
    Command::new("taxon-tag")
        .version(tagging_core::VERSION)
        .about("Inspect and publish taxonomy tags of content items")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("taxonomy")
                .long("taxonomy")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Taxonomy snapshot JSON (overrides config)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print results as JSON"),
        )
        .subcommand(
            Command::new("show")
                .about("Classify the taxons a content item is tagged with")
                .arg(Arg::new("content-id").required(true).help("Content item id")),
        )
        .subcommand(
            Command::new("publish")
                .about("Tag a content item with the given taxons")
                .arg(Arg::new("content-id").required(true).help("Content item id"))
                .arg(
                    Arg::new("taxon")
                        .long("taxon")
                        .action(ArgAction::Append)
                        .help("Selected taxon id (repeatable)"),
                )
                .arg(
                    Arg::new("previous-version")
                        .long("previous-version")
                        .value_parser(value_parser!(u64))
                        .help("Link-set version the selection is based on (loaded when omitted)"),
                ),
        )
}

fn load_config(args: &ArgMatches) -> anyhow::Result<TaggingConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => TaggingConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TaggingConfig::default(),
    }
    .with_env_overrides();

    if let Some(path) = args.get_one::<PathBuf>("taxonomy") {
        config = config.with_taxonomy_path(path);
    }
    config.validate()?;
    Ok(config)
}

async fn load_taxonomy(config: &TaggingConfig) -> anyhow::Result<Arc<Taxonomy>> {
    FileTaxonomySource::new(&config.taxonomy_path)
        .load_taxonomy()
        .await
        .map_err(TaggingError::from)
        .with_context(|| format!("loading taxonomy {}", config.taxonomy_path.display()))
}

fn print_list(label: &str, taxons: &[TaxonId]) {
    if taxons.is_empty() {
        println!("{label}: (none)");
    } else {
        println!("{label}:");
        for taxon in taxons {
            println!("  {taxon}");
        }
    }
}

async fn show(tagger: &Tagger, taxonomy: Arc<Taxonomy>, args: &ArgMatches, json: bool) -> anyhow::Result<()> {
    let content_id = args
        .get_one::<String>("content-id")
        .context("content id is required")?;

    let reconciler = tagger.load_reconciler(content_id, taxonomy).await?;
    let report = ShowReport {
        content_id,
        previous_version: reconciler.selection().previous_version,
        classification: reconciler.classification(),
        most_specific: reconciler.most_specific_taxons(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Content item: {}", report.content_id);
        println!("Version: {}", report.previous_version);
        print_list("Published", &report.classification.published);
        print_list("Visible draft", &report.classification.visible_draft);
        print_list("Invisible draft", &report.classification.invisible_draft);
        print_list("Most specific", &report.most_specific);
    }
    Ok(())
}

async fn publish(tagger: &Tagger, taxonomy: Arc<Taxonomy>, args: &ArgMatches, json: bool) -> anyhow::Result<()> {
    let content_id = args
        .get_one::<String>("content-id")
        .context("content id is required")?;
    let taxons: Vec<String> = args
        .get_many::<String>("taxon")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let previous_version = match args.get_one::<u64>("previous-version") {
        Some(version) => *version,
        None => tagger.load(content_id).await?.previous_version,
    };

    let reconciler = Reconciler::new(
        taxonomy,
        SelectionState::new(content_id.as_str(), taxons, previous_version),
    );

    let invisible = reconciler.invisible_draft_taxons();
    if !invisible.is_empty() {
        tracing::warn!(?invisible, "taxons outside the taxonomy will not be published");
    }

    let receipt = tagger.publish(&reconciler).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        println!("Published {} taxon(s) to {}", receipt.taxons.len(), receipt.content_id);
        match receipt.version {
            Some(version) => println!("New version: {version}"),
            None => println!("New version: (not reported)"),
        }
        print_list("Taxons", &receipt.taxons);
    }
    Ok(())
}

async fn run(matches: ArgMatches) -> anyhow::Result<()> {
    let config = load_config(&matches)?;
    if let Err(e) = logging::init(&config.log_filter, config.log_json) {
        // A subscriber is already installed, so this still gets logged.
        tracing::debug!(error = %e, "keeping existing tracing subscriber");
    }

    let store = PublishingApiClient::new(&config.publishing_api)
        .context("building publishing API client")?;
    let tagger = Tagger::new(Arc::new(store));
    let taxonomy = load_taxonomy(&config).await?;
    let json = matches.get_flag("json");

    match matches.subcommand() {
        Some(("show", args)) => show(&tagger, taxonomy, args, json).await,
        Some(("publish", args)) => publish(&tagger, taxonomy, args, json).await,
        _ => unreachable!("subcommand_required is set"),
    }
}

/// Exit status for a failed run: conflicts are told apart from other failures
fn exit_code(err: &anyhow::Error) -> u8 {
    let conflict = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<TaggingError>())
        .any(TaggingError::is_conflict);
    if conflict {
        EXIT_CONFLICT
    } else {
        EXIT_FAILURE
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();

    match run(matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagging_links::LinkStoreError;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn publish_args_parse() {
        let matches = cli()
            .try_get_matches_from([
                "taxon-tag",
                "publish",
                "abc",
                "--taxon",
                "a",
                "--taxon",
                "b",
                "--previous-version",
                "3",
                "--json",
            ])
            .unwrap();

        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "publish");
        let taxons: Vec<&String> = args.get_many::<String>("taxon").unwrap().collect();
        assert_eq!(taxons.len(), 2);
        assert_eq!(args.get_one::<u64>("previous-version"), Some(&3));
        assert!(matches.get_flag("json"));
    }

    fn conflict() -> TaggingError {
        TaggingError::VersionConflict {
            content_id: "abc".to_string(),
            previous_version: 3,
        }
    }

    #[test]
    fn conflict_exits_with_conflict_status() {
        assert_eq!(exit_code(&anyhow::Error::from(conflict())), EXIT_CONFLICT);
    }

    #[test]
    fn conflict_behind_context_exits_with_conflict_status() {
        let err = anyhow::Error::from(conflict()).context("publishing abc");
        assert_eq!(exit_code(&err), EXIT_CONFLICT);

        let err = Err::<(), _>(conflict())
            .context("publishing abc")
            .unwrap_err();
        assert_eq!(exit_code(&err), EXIT_CONFLICT);
    }

    #[test]
    fn other_failures_exit_with_failure_status() {
        let upstream = TaggingError::Upstream(LinkStoreError::InvalidUrl("mailto:x".to_string()));
        assert_eq!(exit_code(&anyhow::Error::from(upstream)), EXIT_FAILURE);
        assert_eq!(exit_code(&anyhow::anyhow!("taxonomy missing")), EXIT_FAILURE);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(cli().try_get_matches_from(["taxon-tag"]).is_err());
    }
}
