//! `edukit` command-line interface

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use edukit_communities::Request;
use edukit_core::{telemetry, DraftFile, Platform, PlatformConfig};
use std::path::PathBuf;
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("edukit")
        .version(edukit_core::VERSION)
        .about("Curriculum content and learning communities toolkit")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (.toml, .yaml, .yml or .json)"),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a draft without saving")
                .arg(
                    Arg::new("draft")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Draft JSON file"),
                ),
        )
        .subcommand(
            Command::new("save")
                .about("Save a draft to an in-memory store and print the stored content")
                .arg(
                    Arg::new("draft")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Draft JSON file"),
                )
                .arg(
                    Arg::new("submit")
                        .long("submit")
                        .action(ArgAction::SetTrue)
                        .help("Submit for review instead of saving a draft"),
                ),
        )
        .subcommand(
            Command::new("communities")
                .about("Learning community operations")
                .subcommand_required(true)
                .subcommand(Command::new("ops").about("List operations"))
                .subcommand(
                    Command::new("schema")
                        .about("Print the input schema of an operation")
                        .arg(Arg::new("op").required(true)),
                )
                .subcommand(
                    Command::new("run")
                        .about("Run a JSON script of { op, input } steps")
                        .arg(
                            Arg::new("script")
                                .required(true)
                                .value_parser(value_parser!(PathBuf)),
                        ),
                ),
        )
}

fn path_arg<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a PathBuf> {
    args.get_one::<PathBuf>(name)
        .with_context(|| format!("missing <{name}>"))
}

fn check(platform: &Platform, args: &ArgMatches) -> Result<()> {
    let draft = DraftFile::load(path_arg(args, "draft")?)?;
    let editor = platform.draft_editor(draft);
    match editor.check() {
        Ok(()) => {
            println!("ok");
            Ok(())
        }
        Err(e) => {
            println!("invalid: {e}");
            println!("focus: {}", e.section());
            bail!("draft is not ready to save")
        }
    }
}

async fn save(platform: &Platform, args: &ArgMatches) -> Result<()> {
    let draft = DraftFile::load(path_arg(args, "draft")?)?;
    let mut editor = platform.draft_editor(draft);
    let saved = if args.get_flag("submit") {
        editor.submit_for_review().await
    } else {
        editor.save_draft().await
    };
    let saved = match saved {
        Ok(saved) => saved,
        Err(e) => {
            if let Some(section) = e.section() {
                println!("focus: {section}");
            }
            return Err(e.into());
        }
    };
    println!("{}", serde_json::to_string_pretty(&saved)?);
    if let Some(head) = platform.audit().and_then(|a| a.head()) {
        tracing::info!("Audit head {}", head);
    }
    Ok(())
}

async fn communities(platform: &Platform, args: &ArgMatches) -> Result<()> {
    let table = platform.communities();
    match args.subcommand() {
        Some(("ops", _)) => {
            for op in table.operations() {
                println!("{op}");
            }
        }
        Some(("schema", sub)) => {
            let op = sub
                .get_one::<String>("op")
                .context("missing <op>")?;
            let Some(schema) = table.schema(op) else {
                bail!("unknown operation: {op}");
            };
            println!("{}", serde_json::to_string_pretty(schema)?);
        }
        Some(("run", sub)) => {
            let path = path_arg(sub, "script")?;
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let script: Vec<Request> =
                serde_json::from_str(&text).context("script must be a JSON array of steps")?;
            let responses = table.run_script(script).await;
            println!("{}", serde_json::to_string_pretty(&responses)?);
            let failed = responses.iter().filter(|r| !r.is_success()).count();
            if failed > 0 {
                bail!("{failed} step(s) failed");
            }
        }
        _ => bail!("unknown communities command"),
    }
    Ok(())
}

async fn run(matches: ArgMatches) -> Result<()> {
    let config = PlatformConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("loading configuration")?;
    if let Err(e) = telemetry::init(&config.log) {
        eprintln!("warning: {e}");
    }
    let platform = Platform::build(config).await?;

    match matches.subcommand() {
        Some(("check", args)) => check(&platform, args),
        Some(("save", args)) => save(&platform, args).await,
        Some(("communities", args)) => communities(&platform, args).await,
        _ => bail!("unknown command"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(cli().get_matches()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn config_flag_is_global() {
        let m = cli()
            .try_get_matches_from(["edukit", "save", "d.json", "--submit", "--config", "e.toml"])
            .unwrap();
        assert_eq!(
            m.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("e.toml"))
        );
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "save");
        assert!(sub.get_flag("submit"));
    }
}
