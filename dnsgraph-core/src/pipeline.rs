// One input file through parse -> graph -> style -> render -> export

use crate::error::Result;
use crate::export::{inject, save_document};
use crate::graph::DnsGraph;
use crate::parse::{Edge, normalize_records};
use crate::record::{Record, read_records};
use crate::render::{RenderOptions, Renderer, Scene, VisNetworkRenderer};
use crate::style::style_graph;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output path next to the input with the extension replaced by `.html`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

/// Counts reported after a file was converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub output: PathBuf,
    pub records: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Per-file context. Holds the state for a single conversion; nothing is
/// shared between jobs.
#[derive(Debug)]
pub struct GraphJob {
    input: PathBuf,
    output: PathBuf,
    records: Vec<Record>,
    edges: Vec<Edge>,
    graph: DnsGraph,
}

impl GraphJob {
    pub fn new(input: impl Into<PathBuf>, output: Option<PathBuf>) -> Self {
        let input = input.into();
        let output = output.unwrap_or_else(|| default_output_path(&input));
        Self {
            input,
            output,
            records: Vec::new(),
            edges: Vec::new(),
            graph: DnsGraph::new(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn graph(&self) -> &DnsGraph {
        &self.graph
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn read(&mut self) -> Result<()> {
        let file = File::open(&self.input)?;
        self.records = read_records(BufReader::new(file))?;
        debug!("Read {} records from {}", self.records.len(), self.input.display());
        Ok(())
    }

    pub fn build(&mut self) {
        self.edges = normalize_records(&self.records);
        debug!("Normalized {} records into {} edges", self.records.len(), self.edges.len());
        self.graph = DnsGraph::from_edges(&self.edges);
    }

    /// Render and inject controls, returning the finished document
    pub fn render_with<R: Renderer>(&self, renderer: &R, options: &RenderOptions) -> Result<String> {
        let styled = style_graph(&self.graph);
        let title = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dnsgraph".to_string());
        let document = renderer.render(&Scene {
            title: &title,
            graph: &styled,
            options,
        })?;
        inject(&document, &styled.levels)
    }

    pub fn run(&mut self, options: &RenderOptions) -> Result<JobSummary> {
        info!("Processing {}", self.input.display());
        self.read()?;
        self.build();
        let html = self.render_with(&VisNetworkRenderer, options)?;
        save_document(&html, &self.output)?;
        info!("Wrote {}", self.output.display());

        Ok(JobSummary {
            output: self.output.clone(),
            records: self.records.len(),
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
        })
    }
}
