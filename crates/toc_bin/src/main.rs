mod demo_collaborators;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use logger::{Logger, StdioLogger};
use toc_collaborators::Collaborators;
use toc_config::parse_join_config;
use toc_diagnostics::VecErrorSink;
use toc_loader::TocLoader;
use toc_model::JoinConfig;
use toc_path::FilePath;

use demo_collaborators::{
    DemoParser, FsLinkResolver, NoopXrefResolver, RecordingDependencyMap, SidecarMonikerProvider,
    SimpleUrlClassifier, TracingContentValidator,
};

/// Drives the TOC loader against a directory of fixture TOC files.
///
/// This is a manual-verification convenience, not a production entry point:
/// it never parses real TOC syntax (that stays a host responsibility), it
/// only reads the demo JSON shape documented alongside the fixtures.
#[derive(ClapParser, Debug)]
struct CliArgs {
    /// Directory containing the fixture tree.
    #[arg(long, default_value = "demos/toc_fixtures")]
    root: PathBuf,

    /// Entry file to load, relative to `root`.
    #[arg(long, default_value = "TOC.json")]
    entry: String,

    /// Optional join-config JSON file (a JSON array of `{referenceToc,
    /// topLevelToc}` entries), relative to `root`.
    #[arg(long)]
    join_config: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let args = CliArgs::parse();
    let logger = StdioLogger::new();

    let join_config = match &args.join_config {
        Some(relative_path) => {
            let path = args.root.join(relative_path);
            let raw = fs::read_to_string(&path).with_context(|| format!("reading join config {}", path.display()))?;
            parse_join_config(&raw).with_context(|| format!("parsing join config {}", path.display()))?
        }
        None => JoinConfig::default(),
    };

    let parser = DemoParser { root: args.root.clone() };
    let link_resolver = FsLinkResolver { root: args.root.clone() };
    let xref_resolver = NoopXrefResolver;
    let moniker_provider = SidecarMonikerProvider { root: args.root.clone() };
    let content_validator = TracingContentValidator;
    let dependency_map = RecordingDependencyMap::default();
    let url_classifier = SimpleUrlClassifier;
    let sink = VecErrorSink::new();

    let collaborators = Collaborators {
        parser: &parser,
        link_resolver: &link_resolver,
        xref_resolver: &xref_resolver,
        moniker_provider: &moniker_provider,
        content_validator: &content_validator,
        dependency_map: &dependency_map,
        url_classifier: &url_classifier,
        error_sink: &sink,
    };

    let loader = TocLoader::new(&join_config);
    let entry_file = FilePath::working_tree(&args.entry);

    (&logger).log(format!("loading {} from {}", args.entry, args.root.display()));
    let start = std::time::Instant::now();
    let load_result = loader.load(&entry_file, collaborators);
    let elapsed = start.elapsed();

    match load_result {
        Ok((node, referenced_files, referenced_tocs)) => {
            (&logger).log(format!(
                "loaded '{}' in {:.2?}: {} top-level items, {} referenced files, {} referenced tocs",
                node.name,
                elapsed,
                node.items.len(),
                referenced_files.len(),
                referenced_tocs.len(),
            ));
        }
        Err(err) => {
            (&logger).error(format!("load failed: {err}"));
        }
    }

    for entry in sink.drain() {
        (&logger).warn(format!("{}", entry.diagnostic));
    }
    for (from, to, kind) in dependency_map.drain() {
        (&logger).log(format!("dependency: {from} -> {to} ({kind:?})"));
    }

    Ok(())
}
