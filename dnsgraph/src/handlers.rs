use anyhow::{Context, Result, bail};
use colored::Colorize;
use dnsgraph_core::render::DEFAULT_VIS_CDN;
use dnsgraph_core::{GraphJob, JobSummary, RenderOptions, ScriptSource};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// What the positional argument points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    File(PathBuf),
    Directory(PathBuf),
}

/// Expand `~` in a user supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Decide whether the input is a file or a directory
pub fn classify_input(path: &Path) -> Result<InputKind, String> {
    if path.is_file() {
        Ok(InputKind::File(path.to_path_buf()))
    } else if path.is_dir() {
        Ok(InputKind::Directory(path.to_path_buf()))
    } else {
        Err(format!("Invalid input: {}", path.display()))
    }
}

/// True for paths whose extension is `csv`, ignoring case
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// CSV files directly inside `dir`, sorted by name. Subdirectories are not
/// searched.
pub fn collect_csv_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_csv(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Build render options. The bundled viewer is used unless a local
/// vis-network build is given or a CDN link is requested.
pub fn render_options(vis_js: Option<&Path>, cdn: bool) -> Result<RenderOptions> {
    let options = RenderOptions::default();
    match vis_js {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read vis-network bundle {}", path.display()))?;
            info!("Inlining vis-network from {}", path.display());
            Ok(options.with_script(ScriptSource::Inline(source)))
        }
        None if cdn => Ok(options.with_script(ScriptSource::Cdn(DEFAULT_VIS_CDN.to_string()))),
        None => Ok(options),
    }
}

/// Convert a single CSV file
pub fn process_file(
    input: &Path,
    output: Option<PathBuf>,
    options: &RenderOptions,
) -> Result<JobSummary> {
    let mut job = GraphJob::new(input, output);
    job.run(options)
        .with_context(|| format!("Failed to process {}", input.display()))
}

/// Outcome of a directory run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<JobSummary>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert every CSV in a directory. A failing file is logged and skipped.
pub fn process_directory(dir: &Path, options: &RenderOptions, quiet: bool) -> Result<BatchReport> {
    let files = collect_csv_files(dir)
        .with_context(|| format!("Failed to list directory {}", dir.display()))?;
    info!("Found {} CSV files in {}", files.len(), dir.display());

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        pb
    };

    let mut report = BatchReport::default();
    for file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.set_message(name);

        match process_file(&file, None, options) {
            Ok(summary) => {
                if !quiet {
                    progress.println(success_line(&summary));
                }
                report.succeeded.push(summary);
            }
            Err(e) => {
                error!("Failed to convert {}: {:#}", file.display(), e);
                progress.println(format!("{} {}: {:#}", "✗".red(), file.display(), e));
                report.failed.push((file, format!("{:#}", e)));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(report)
}

/// Dispatch on the input kind. Returns whether every file converted.
pub fn handle_input(
    input: &Path,
    output: Option<PathBuf>,
    options: &RenderOptions,
    quiet: bool,
) -> Result<bool> {
    let kind = classify_input(input).map_err(anyhow::Error::msg)?;
    match kind {
        InputKind::File(path) => {
            let summary = process_file(&path, output, options)?;
            if !quiet {
                println!("{}", success_line(&summary));
            }
            Ok(true)
        }
        InputKind::Directory(path) => {
            if output.is_some() {
                bail!("--output can only be used with a single CSV file");
            }
            let report = process_directory(&path, options, quiet)?;
            if !quiet {
                println!(
                    "\n{} converted, {} failed",
                    report.succeeded.len().to_string().green(),
                    report.failed.len().to_string().red()
                );
            }
            Ok(report.is_success())
        }
    }
}

fn success_line(summary: &JobSummary) -> String {
    format!(
        "{} Generated: {} ({} nodes, {} edges)",
        "✓".green(),
        summary.output.display(),
        summary.nodes,
        summary.edges
    )
}
