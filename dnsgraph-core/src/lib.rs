pub mod error;
pub mod export;
pub mod graph;
pub mod parse;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod style;

pub use error::{GraphError, Result};
pub use graph::DnsGraph;
pub use pipeline::{GraphJob, JobSummary, default_output_path};
pub use record::{Record, RecordType};
pub use render::{RenderOptions, ScriptSource};

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
     _                                 _
  __| |_ __  ___  __ _ _ __ __ _ _ __ | |__
 / _` | '_ \/ __|/ _` | '__/ _` | '_ \| '_ \
| (_| | | | \__ \ (_| | | | (_| | |_) | | | |
 \__,_|_| |_|___/\__, |_|  \__,_| .__/|_| |_|
                 |___/          |_|
"#;
    println!("{}", banner.bright_cyan());
    println!(
        "  {} {}\n",
        "DNS records as interactive graphs".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
