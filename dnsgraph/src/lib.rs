pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    BatchReport, InputKind, classify_input, collect_csv_files, expand_path, handle_input,
    is_csv, process_directory, process_file, render_options,
};

// Re-export pipeline entry points from dnsgraph-core
pub use dnsgraph_core::{GraphJob, JobSummary, RenderOptions, default_output_path};
