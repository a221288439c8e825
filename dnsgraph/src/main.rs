use commands::command_argument_builder;
use dnsgraph::{expand_path, handle_input, render_options};
use dnsgraph_core::print_banner;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

fn main() -> ExitCode {
    let matches = command_argument_builder().get_matches();
    let quiet = matches.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    tracing_init();

    let input = expand_path(matches.get_one::<String>("INPUT").map_or("", String::as_str));
    let output = matches.get_one::<PathBuf>("output").cloned();
    let vis_js = matches.get_one::<PathBuf>("vis-js");

    let options = match render_options(vis_js.map(PathBuf::as_path), matches.get_flag("vis-cdn")) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match handle_input(&input, output, &options, quiet) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dnsgraph=info,dnsgraph_core=info".into()),
        )
        .init();
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
