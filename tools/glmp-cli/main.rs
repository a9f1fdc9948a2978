use clap::{Parser, Subcommand};
use glmp::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Extract computational logic from biological papers and draw it as flowcharts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract logic statements from a text file
    Extract {
        /// Path to the UTF-8 text file
        text_path: PathBuf,
        /// Where to write the extraction JSON
        #[arg(short, long, default_value = "extracted_logic.json")]
        output: PathBuf,
    },
    /// Turn a saved extraction JSON into a flowchart image and JSON
    Synthesize {
        /// Path to an extraction JSON produced by `extract`
        extraction_path: PathBuf,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(long, default_value = "flowchart.png")]
        image: PathBuf,
        #[arg(long, default_value = "flowchart.json")]
        data: PathBuf,
    },
    /// Run the full extract-then-synthesize workflow on a paper
    Process {
        /// Path to the UTF-8 text file
        paper_path: PathBuf,
        #[arg(short, long, default_value = "Paper Analysis")]
        title: String,
        /// Overrides the configured output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Also write the workflow record to this JSON file
        #[arg(long)]
        workflow_record: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => CoordinatorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => CoordinatorConfig::default(),
    };

    match cli.command {
        Command::Extract { text_path, output } => run_extract(config, text_path, output),
        Command::Synthesize {
            extraction_path,
            title,
            image,
            data,
        } => run_synthesize(config, extraction_path, title, image, data),
        Command::Process {
            paper_path,
            title,
            output_dir,
            workflow_record,
        } => run_process(config, paper_path, title, output_dir, workflow_record),
    }
}

fn run_extract(config: CoordinatorConfig, text_path: PathBuf, output: PathBuf) {
    let start = Instant::now();
    let extractor = Extractor::new(config.extractor);
    let result = extractor
        .extract_file(&text_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Extraction failed: {}", e)));
    extractor
        .save_results(&result, &output)
        .unwrap_or_else(|e| exit_with_error(&format!("Could not save results: {}", e)));

    println!("\n=== Extraction Results ===");
    println!("Document: {}", result.document_id);
    println!("{}", result.summary);
    println!("Total elements: {}", result.metadata.total);
    println!("Average confidence: {:.2}", result.metadata.avg_confidence);
    println!("Results saved to {} in {:?}", output.display(), start.elapsed());
}

fn run_synthesize(
    config: CoordinatorConfig,
    extraction_path: PathBuf,
    title: Option<String>,
    image: PathBuf,
    data: PathBuf,
) {
    let extraction = ExtractionResult::from_file(&extraction_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Could not load extraction: {}", e)));
    let title = title.unwrap_or_else(|| format!("Logic Flowchart - {}", extraction.document_id));

    let builder = FlowchartBuilder::new(config.render);
    let flowchart = builder.synthesize_extraction(&extraction, &title);
    builder
        .render(&flowchart, &image)
        .unwrap_or_else(|e| exit_with_error(&format!("Rendering failed: {}", e)));
    builder
        .serialize(&flowchart, &data)
        .unwrap_or_else(|e| exit_with_error(&format!("Serialization failed: {}", e)));

    println!("\n=== Flowchart ===");
    println!("Title: {}", flowchart.title);
    println!("Total elements: {}", flowchart.metadata.total_nodes);
    for (kind, count) in &flowchart.metadata.per_kind {
        println!("  - {}: {}", kind, count);
    }
    println!("Image saved as {}", image.display());
    println!("Data saved as {}", data.display());
}

fn run_process(
    config: CoordinatorConfig,
    paper_path: PathBuf,
    title: String,
    output_dir: Option<PathBuf>,
    workflow_record: Option<PathBuf>,
) {
    let config = match output_dir {
        Some(dir) => config.with_output_dir(dir),
        None => config,
    };
    let mut coordinator = Coordinator::new(config);

    let start = Instant::now();
    let outcome = coordinator.process_paper(&paper_path, &title);
    let elapsed = start.elapsed();

    // The workflow is recorded even when a step fails, so report its state either way.
    for summary in coordinator.list_workflows() {
        if let Ok(status) = coordinator.get_workflow_status(&summary.workflow_id) {
            println!("\nWorkflow {} ({}): {}", status.workflow_id, status.title, status.status);
            for step in &status.steps {
                match &step.error {
                    Some(error) => println!("  - {} [{}]: {}", step.name, step.status, error),
                    None => println!("  - {} [{}]", step.name, step.status),
                }
            }
        }
        if let Some(path) = &workflow_record {
            coordinator
                .save_workflow(&summary.workflow_id, path)
                .unwrap_or_else(|e| exit_with_error(&format!("Could not save workflow: {}", e)));
        }
    }

    match outcome {
        Ok(analysis) => {
            println!("\n=== Analysis Complete in {:?} ===", elapsed);
            println!("Workflow ID: {}", analysis.workflow_id);
            for file in &analysis.output_files {
                println!("  -> {}", file.display());
            }
        }
        Err(e) => exit_with_error(&format!("Workflow failed: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
