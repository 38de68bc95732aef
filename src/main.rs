//! phprst — render reStructuredText API pages from PHP reflection dumps.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `phprst < dump.json` prints every class document
//! - **file mode**: `phprst -o docs/api --index "API" dumps/*.json`

mod docblock;
mod logging;
mod model;
mod reflection;
mod render;
mod toc;
mod writer;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use model::{ClassDescriptor, Visibility, NS_SEPARATOR};
use reflection::{JsonReflection, ReflectionProvider};
use render::{ClassDocument, Element};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[derive(Parser)]
#[command(
    name = "phprst",
    about = "Generate reStructuredText class documentation from PHP reflection dumps"
)]
struct Cli {
    /// Reflection dump files (glob patterns and directories supported).
    /// If omitted, reads one dump from stdin.
    dumps: Vec<String>,

    /// Output directory (required when dump files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Only document these classes (fully-qualified). Can be repeated.
    #[arg(short = 'c', long = "class")]
    classes: Vec<String>,

    /// Where class documents are placed inside the output directory
    #[arg(long, value_enum, default_value_t = Layout::Flat)]
    layout: Layout,

    /// Least visible members to include
    #[arg(long, value_enum, default_value_t = Visibility::Private)]
    visibility: Visibility,

    /// Prefix template file prepended to each document.
    /// Supports ${name} and ${class} substitution.
    #[arg(short = 'p', long)]
    prefix: Option<PathBuf>,

    /// Include classes tagged @internal
    #[arg(long)]
    show_internal: bool,

    /// Filter classes by doc-comment tag. Prefix with ! to exclude.
    /// Can be specified multiple times. E.g. --filter '!deprecated'
    #[arg(long)]
    filter: Vec<String>,

    /// Also write index.rst with this title and a toctree of all documents
    #[arg(long)]
    index: Option<String>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// Every document directly in the output directory
    Flat,
    /// One subdirectory per namespace segment
    Namespaced,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    if cli.dumps.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read one dump from stdin, print every document to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let reflection = JsonReflection::from_json(&input)?;
    let mut failed = 0;
    for name in selected_names(cli, &reflection) {
        match prepare(cli, &reflection, &name) {
            Ok(Some(class)) => print!("{}", ClassDocument::new(&class).render()),
            Ok(None) => {}
            Err(e) => {
                error!("{:#}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} class(es) could not be documented", failed);
    }
    Ok(())
}

/// file mode: load every dump, write one document per class to the output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when dump files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let prefix_template = match cli.prefix {
        Some(ref path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read prefix file: {}", path.display()))?,
        ),
        None => None,
    };

    let mut reflection = JsonReflection::new();
    for path in expand_globs(&cli.dumps)? {
        reflection.load(&path)?;
    }
    if reflection.is_empty() {
        anyhow::bail!("no classes found in the given dumps");
    }
    info!(classes = reflection.len(), "reflection loaded");

    let mut written: Vec<PathBuf> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut failed = 0;

    for name in selected_names(cli, &reflection) {
        let result = prepare(cli, &reflection, &name).and_then(|class| match class {
            Some(class) => {
                write_class(cli, output_dir, &class, prefix_template.as_deref()).map(Some)
            }
            None => Ok(None),
        });

        match result {
            Ok(Some(relative)) => {
                if !seen.insert(relative.clone()) {
                    warn!(class = %name, path = %relative.display(), "document overwritten by a class with the same short name");
                } else {
                    written.push(relative);
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!(class = %name, "{:#}", e);
                failed += 1;
            }
        }
    }

    if let Some(ref title) = cli.index {
        let index = toc::render_index(title, &written);
        writer::write_document(output_dir, Path::new("index.rst"), &index)?;
    }

    info!(written = written.len(), failed, "done");
    if failed > 0 {
        anyhow::bail!("{} class(es) could not be documented", failed);
    }
    Ok(())
}

/// Class names to document: `--class` arguments (first occurrence of each),
/// or everything the provider knows.
fn selected_names(cli: &Cli, reflection: &dyn ReflectionProvider) -> Vec<String> {
    if cli.classes.is_empty() {
        reflection
            .class_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        let mut seen = HashSet::new();
        cli.classes
            .iter()
            .filter(|name| seen.insert(model::strip_leading_separator(name)))
            .cloned()
            .collect()
    }
}

/// Resolve, filter and narrow a class. `Ok(None)` means it was filtered out.
fn prepare<'r>(
    cli: &Cli,
    reflection: &'r dyn ReflectionProvider,
    name: &str,
) -> Result<Option<Cow<'r, ClassDescriptor>>> {
    let class = reflection.get_class(name)?;
    let doc = docblock::parse_opt(class.doc_comment.as_deref());
    if !is_selected(&doc, cli.show_internal, &cli.filter) {
        debug!(class = %class.name, "skipped by filter");
        return Ok(None);
    }
    Ok(Some(restrict_visibility(class, cli.visibility)))
}

/// Render one class and write it. Returns the path relative to the output directory.
fn write_class(
    cli: &Cli,
    output_dir: &Path,
    class: &ClassDescriptor,
    prefix: Option<&str>,
) -> Result<PathBuf> {
    let document = ClassDocument::new(class);
    let relative = match cli.layout {
        Layout::Flat => document.path(),
        Layout::Namespaced => namespace_dir(&class.namespace).join(document.path()),
    };

    let mut output = String::new();
    if let Some(tpl) = prefix {
        output.push_str(
            &tpl.replace("${name}", &class.short_name)
                .replace("${class}", &class.name),
        );
        output.push('\n');
    }
    output.push_str(&document.render());
    let output = render::normalize_whitespace(&output);

    if let Some(parent) = relative.parent() {
        let dir = output_dir.join(parent);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    }
    let path = writer::write_document(output_dir, &relative, &output)?;
    debug!(class = %class.name, path = %path.display(), "wrote document");
    Ok(relative)
}

/// `App\Models` → `App/Models`
fn namespace_dir(namespace: &str) -> PathBuf {
    namespace
        .split(NS_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Drop properties and methods less visible than `max`.
///
/// Borrows the provider's descriptor when nothing needs to go.
fn restrict_visibility(class: &ClassDescriptor, max: Visibility) -> Cow<'_, ClassDescriptor> {
    let hidden = class.properties.iter().any(|p| p.visibility > max)
        || class.methods.iter().any(|m| m.visibility > max);
    if !hidden {
        return Cow::Borrowed(class);
    }
    let mut narrowed = class.clone();
    narrowed.properties.retain(|p| p.visibility <= max);
    narrowed.methods.retain(|m| m.visibility <= max);
    Cow::Owned(narrowed)
}

/// File extensions recognized as reflection dumps.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for dump files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if SUPPORTED_EXTENSIONS.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Decide whether a class is documented, based on its doc-comment tags.
///
/// By default, @internal classes are excluded. Use --show-internal to include them.
/// --filter supports inclusion (e.g. "api") and exclusion (e.g. "!deprecated") by tag.
fn is_selected(doc: &docblock::ParsedDoc, show_internal: bool, filters: &[String]) -> bool {
    if doc.has_tag("internal") && !show_internal && !filters.iter().any(|f| f == "internal") {
        return false;
    }

    for filter in filters {
        match filter.strip_prefix('!') {
            Some(excluded) => {
                if doc.has_tag(excluded) {
                    return false;
                }
            }
            None => {
                if !doc.has_tag(filter) {
                    return false;
                }
            }
        }
    }

    true
}
