use crate::CLAP_STYLING;
use clap::arg;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("dnsgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("dnsgraph")
        .about("Visualize CSV exports of DNS records as interactive HTML graphs")
        .styles(CLAP_STYLING)
        .arg(
            arg!(<INPUT>)
                .required(true)
                .help("Input CSV file, or a directory whose *.csv files are all converted"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Write the HTML here instead of next to the input (single file only)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"vis-js" <PATH>)
                .required(false)
                .env("DNSGRAPH_VIS_JS")
                .help("Local vis-network bundle to inline instead of the bundled viewer")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"vis-cdn" "Link vis-network from unpkg instead of embedding a viewer (needs network access to view)")
                .required(false)
                .conflicts_with("vis-js"),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
}
