//! Command-line interface for folio
//!
//! Runs the content pipeline over local feed files, mostly to check a spreadsheet export or
//! a tile body before publishing it.
//!
//! Usage:
//!   folio tiles `<csv>` --lane `<lane>` [--search `<text>`] [--tag `<tag>`]...   - Filtered tile grid as JSON
//!   folio tags `<csv>` --lane `<lane>`                                         - Tag chips of a lane
//!   folio experiences `<json>` --lane `<lane>` [--search] [--tag `<group::value>`]...
//!   folio experience-tags `<json>` --lane `<lane>`
//!   folio experience `<json>` --slug `<slug>`
//!   folio render `<markdown>`                                                  - MarkdownLite to HTML
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

mod commands;
mod error;

use clap::{Arg, ArgAction, ArgMatches, Command};
use commands::Settings;
use error::CliError;
use folio_core::Query;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn path_arg(help: &'static str) -> Arg {
    Arg::new("path")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .index(1)
}

fn lane_arg() -> Arg {
    Arg::new("lane")
        .long("lane")
        .short('l')
        .help("Lane to show (e.g. 'business', 'creative')")
        .required(true)
}

fn query_args(tag_help: &'static str) -> [Arg; 2] {
    [
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Free text, matched case-insensitively"),
        Arg::new("tag")
            .long("tag")
            .short('t')
            .help(tag_help)
            .action(ArgAction::Append),
    ]
}

fn config_args() -> [Arg; 2] {
    [
        Arg::new("config")
            .long("config")
            .short('c')
            .help("TOML file layered over the built-in defaults")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("max-tags")
            .long("max-tags")
            .help("Override feed.max_tags")
            .value_parser(clap::value_parser!(usize)),
    ]
}

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect portfolio feeds: filter tiles and experiences, render markdown-lite")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tiles")
                .about("Print the filtered tile grid of a lane as JSON")
                .arg(path_arg("Path to the CSV export"))
                .arg(lane_arg())
                .args(query_args("Selected tag; a tile matches if it has any of them"))
                .args(config_args()),
        )
        .subcommand(
            Command::new("tags")
                .about("List the tag chips of a lane")
                .arg(path_arg("Path to the CSV export"))
                .arg(lane_arg())
                .args(config_args()),
        )
        .subcommand(
            Command::new("experiences")
                .about("Print the matching experiences of a lane as JSON")
                .arg(path_arg("Path to the experiences JSON feed"))
                .arg(lane_arg())
                .args(query_args("Selected tag as group::value; all of them must match")),
        )
        .subcommand(
            Command::new("experience-tags")
                .about("List the experience tag chips of a lane")
                .arg(path_arg("Path to the experiences JSON feed"))
                .arg(lane_arg()),
        )
        .subcommand(
            Command::new("experience")
                .about("Print one experience as JSON")
                .arg(path_arg("Path to the experiences JSON feed"))
                .arg(
                    Arg::new("slug")
                        .long("slug")
                        .help("Slug of the experience")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a MarkdownLite file to an HTML fragment")
                .arg(path_arg("Path to the markdown file"))
                .args(config_args()),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    match run(&matches) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(matches: &ArgMatches) -> Result<String, CliError> {
    let (name, sub) = matches
        .subcommand()
        .unwrap_or_else(|| unreachable!("subcommand_required"));
    let path = sub
        .get_one::<PathBuf>("path")
        .unwrap_or_else(|| unreachable!("path is required"));
    let lane = || sub.get_one::<String>("lane").map_or("", String::as_str);

    match name {
        "tiles" => commands::tiles(path, lane(), &query(sub), &settings(sub)),
        "tags" => commands::tags(path, lane(), &settings(sub)),
        "experiences" => commands::experiences(path, lane(), &query(sub)),
        "experience-tags" => commands::experience_tags(path, lane()),
        "experience" => {
            let slug = sub.get_one::<String>("slug").map_or("", String::as_str);
            commands::experience(path, slug)
        }
        "render" => commands::render(path, &settings(sub)),
        other => unreachable!("unknown subcommand {other}"),
    }
}

fn query(matches: &ArgMatches) -> Query {
    let mut query = Query::new();
    if let Some(text) = matches.get_one::<String>("search") {
        query.set_text(text.as_str());
    }
    if let Some(tags) = matches.get_many::<String>("tag") {
        query = query.with_tags(tags.cloned());
    }
    query
}

fn settings(matches: &ArgMatches) -> Settings {
    Settings {
        config_file: matches.get_one::<PathBuf>("config").cloned(),
        max_tags: matches.get_one::<usize>("max-tags").copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        build_cli().debug_assert();
    }

    #[test]
    fn query_collects_repeated_tags() {
        let matches = build_cli()
            .try_get_matches_from([
                "folio", "tiles", "feed.csv", "--lane", "biz", "-t", "rust", "-t", "cli", "-s",
                "beta",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let query = query(sub);
        assert_eq!(query.free_text(), "beta");
        assert_eq!(query.selected_tags().len(), 2);
    }
}
