//! Command implementations behind the CLI.
//!
//! Each `run_*` function loads its inputs, runs the engine and writes the
//! human-readable or JSON report to `out`. Diagnostics go through `tracing`
//! (stderr), so `out` only ever carries the report itself.
//!
//! Errors are returned rather than printed; the binary reports them and exits
//! with status 1.

use crate::cli::{
    Commands, DirectArgs, InitArgs, RedundancyArgs, SourceArgs, TrainArgs, ValidateArgs,
};
use crate::config::{ConfigManager, DEFAULT_CONFIG_FILE};
use crate::extract::{ClassSource, CssExtractor, CssParser, HtmlExtractor, SourceScanner};
use crate::metrics::RunMetrics;
use crate::models::{ClassSet, ClassificationResult, ToolSettings};
use crate::services::{Classifier, Trainer, analyze_redundancy, compare_directly};
use crate::{APP_NAME, VERSION};
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;

/// How a command finished, independent of how it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The command ran, but found what `--fail` asks to fail on
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// State shared by every command of one run.
#[derive(Debug)]
pub struct CommandContext {
    pub settings: ToolSettings,
    pub settings_path: Utf8PathBuf,
    pub verbose: bool,
    pub metrics: RunMetrics,
}

impl CommandContext {
    pub fn new(settings: ToolSettings, settings_path: Utf8PathBuf, verbose: bool) -> Self {
        Self {
            settings,
            settings_path,
            verbose,
            metrics: RunMetrics::new(),
        }
    }

    fn config_manager(&self, config_path: &Utf8Path) -> ConfigManager {
        ConfigManager::new(config_path, &self.settings_path)
    }

    /// Collect one source, recording how long it took and what it produced.
    fn collect(&self, source: &dyn ClassSource) -> Result<ClassSet> {
        let started = Instant::now();
        let classes = source
            .collect()
            .with_context(|| format!("Failed to collect classes from {}", source.describe()))?;

        self.metrics.record_source(classes.len(), started.elapsed());
        tracing::debug!("{}: {} classes", source.describe(), classes.len());
        Ok(classes)
    }
}

/// Dispatch a parsed command.
pub fn run(command: &Commands, ctx: &CommandContext, out: &mut dyn Write) -> Result<Status> {
    let status = match command {
        Commands::Train(args) => run_train(ctx, args, out)?,
        Commands::Validate(args) => run_validate(ctx, args, out)?,
        Commands::Direct(args) => run_direct(ctx, args, out)?,
        Commands::Redundancy(args) => run_redundancy(ctx, args, out)?,
        Commands::Init(args) => run_init(ctx, args, out)?,
        Commands::Version => {
            writeln!(out, "{} v{}", APP_NAME, VERSION)?;
            Status::Success
        }
    };

    ctx.metrics.log_summary();
    Ok(status)
}

/// Learn patterns from stylesheets and save the trained configuration.
pub fn run_train(ctx: &CommandContext, args: &TrainArgs, out: &mut dyn Write) -> Result<Status> {
    let css_classes = ctx
        .collect(&CssExtractor::new(clean_paths(&args.css)))
        .context("Error extracting CSS classes")?;

    if ctx.verbose {
        writeln!(out, "Found {} unique CSS classes", css_classes.len())?;
    }

    let trainer = Trainer::default().with_ignored(
        ctx.settings
            .ignore
            .iter()
            .chain(args.ignore.iter())
            .map(|class| class.trim())
            .filter(|class| !class.is_empty()),
    );
    let config = trainer
        .train_checked(&css_classes)
        .context("Nothing to train on")?;
    ctx.metrics.record_patterns(config.patterns.len());

    if ctx.verbose {
        writeln!(
            out,
            "Generated {} patterns and {} literal classes",
            config.patterns.len(),
            config.literal_classes.len()
        )?;
    }

    ctx.config_manager(&args.output).save_configuration(&config)?;

    writeln!(out, "Trained config saved to {}", args.output)?;
    writeln!(out, "  Patterns: {}", config.patterns.len())?;
    writeln!(out, "  Literals: {}", config.literal_classes.len())?;
    if !config.ignored.is_empty() {
        writeln!(out, "  Ignored:  {}", config.ignored.len())?;
    }

    Ok(Status::Success)
}

/// Check markup (and optionally source) classes against a trained configuration.
pub fn run_validate(
    ctx: &CommandContext,
    args: &ValidateArgs,
    out: &mut dyn Write,
) -> Result<Status> {
    let mut config = ctx.config_manager(&args.config).load_configuration()?;
    config.extend_ignored(ctx.settings.ignore.iter().cloned());

    let (target, source_count) = collect_target(ctx, &args.html, &args.sources)?;

    let classifier = Classifier::new(config).context("Trained config is not usable")?;
    ctx.metrics
        .record_patterns(classifier.config().patterns.len());

    let result = classifier.classify(&target);
    ctx.metrics.record_classified(target.len());

    if args.json {
        write_json(out, &result)?;
    } else {
        if source_count > 0 {
            writeln!(out, "Source Classes: {}", source_count)?;
        }
        write!(out, "{}", result.summary())?;
        if ctx.verbose && result.has_orphans() {
            writeln!(out, "\nOrphan classes:")?;
            write_list(out, &result.orphans, None)?;
        }
    }

    Ok(fail_status(args.fail, &result))
}

/// Compare markup classes with stylesheet classes, no training involved.
pub fn run_direct(ctx: &CommandContext, args: &DirectArgs, out: &mut dyn Write) -> Result<Status> {
    let (target, source_count) = collect_target(ctx, &args.html, &args.sources)?;

    let css_classes = ctx
        .collect(&CssExtractor::new(clean_paths(&args.css)))
        .context("Error extracting CSS classes")?;

    let result = compare_directly(&target, &css_classes);
    ctx.metrics.record_classified(target.len());

    if args.json {
        write_json(out, &result)?;
    } else {
        if source_count > 0 {
            writeln!(out, "Source Classes: {}", source_count)?;
        }
        write!(out, "{}", result.summary())?;
        if ctx.verbose && result.has_orphans() {
            writeln!(out, "\nOrphan classes (in HTML, not in CSS):")?;
            write_list(out, &result.orphans, None)?;
        }
        if args.unused && result.has_unused() {
            writeln!(out, "\nUnused classes (in CSS, not in HTML):")?;
            write_list(out, &result.unused, Some(ctx.settings.unused_display_limit))?;
        }
    }

    Ok(fail_status(args.fail, &result))
}

/// Report classes that several stylesheets define.
pub fn run_redundancy(
    ctx: &CommandContext,
    args: &RedundancyArgs,
    out: &mut dyn Write,
) -> Result<Status> {
    let paths = clean_paths(&args.css);
    if paths.len() < 2 {
        bail!("Need at least 2 CSS files to compare");
    }

    let parser = CssParser::new();
    let mut files: IndexMap<String, ClassSet> = IndexMap::new();
    for path in &paths {
        let started = Instant::now();
        match parser.parse_path(path) {
            Ok(classes) => {
                ctx.metrics.record_source(classes.len(), started.elapsed());
                files.insert(path.to_string(), classes);
            }
            Err(e) => tracing::warn!("Skipping stylesheet {}: {:#}", path, e),
        }
    }

    let threshold = args
        .threshold
        .unwrap_or(ctx.settings.redundancy_threshold);
    let report = analyze_redundancy(&files, threshold, ctx.verbose);

    if args.json {
        return write_json(out, &report).map(|_| Status::Success);
    }

    writeln!(out, "Files analyzed: {}", report.total_files)?;
    writeln!(out, "Total unique classes: {}", report.total_classes)?;
    writeln!(
        out,
        "Redundant classes: {} (defined in 2+ files)",
        report.redundant_count
    )?;

    writeln!(out, "\nFile comparisons:")?;
    for pair in &report.pairs {
        let (name1, name2) = (display_name(&pair.file1), display_name(&pair.file2));
        writeln!(out, "  {} vs {}", name1, name2)?;
        writeln!(
            out,
            "    Overlap: {} classes ({:.1}% coverage)",
            pair.overlap, pair.coverage_percent
        )?;
        writeln!(out, "    Only in {}: {}", name1, pair.file1_only)?;
        writeln!(out, "    Only in {}: {}", name2, pair.file2_only)?;
    }

    if !report.removable.is_empty() {
        writeln!(out, "\nPotentially removable (>={:.0}% coverage):", threshold)?;
        write_list(out, &report.removable, None)?;
    }

    if let Some(redundant) = report.redundant.as_ref().filter(|r| !r.is_empty()) {
        writeln!(out, "\nRedundant classes:")?;
        let limit = ctx.settings.unused_display_limit;
        for (class, defined_in) in redundant.iter().take(limit) {
            let names: Vec<&str> = defined_in.iter().map(|f| display_name(f)).collect();
            writeln!(out, "  {}: {}", class, names.join(", "))?;
        }
        if redundant.len() > limit {
            writeln!(out, "  ... and {} more", redundant.len() - limit)?;
        }
    }

    Ok(Status::Success)
}

/// Save the settings this run resolved (defaults, file and environment) as YAML.
pub fn run_init(ctx: &CommandContext, args: &InitArgs, out: &mut dyn Write) -> Result<Status> {
    if ctx.settings_path.exists() && !args.force {
        bail!(
            "Settings file {} already exists (use --force to overwrite)",
            ctx.settings_path
        );
    }

    ConfigManager::new(DEFAULT_CONFIG_FILE, &ctx.settings_path).save_settings(&ctx.settings)?;
    writeln!(out, "Settings written to {}", ctx.settings_path)?;

    Ok(Status::Success)
}

/// Classes referenced by markup, merged with classes found in sources.
///
/// Returns the merged set and the number of classes the sources contributed
/// on their own (zero when no source path was given).
fn collect_target(
    ctx: &CommandContext,
    html: &Utf8Path,
    sources: &SourceArgs,
) -> Result<(ClassSet, usize)> {
    let mut target = ctx
        .collect(&HtmlExtractor::new(html))
        .context("Error extracting HTML classes")?;

    let src_paths = clean_paths(&sources.src);
    if src_paths.is_empty() {
        return Ok((target, 0));
    }

    let extensions = if sources.src_ext.is_empty() {
        &ctx.settings.src_extensions
    } else {
        &sources.src_ext
    };
    let excludes = if sources.src_exclude.is_empty() {
        &ctx.settings.src_excludes
    } else {
        &sources.src_exclude
    };

    let scanner = SourceScanner::new(src_paths)
        .with_extensions(extensions)
        .with_excludes(excludes);
    let source_classes = ctx
        .collect(&scanner)
        .context("Error scanning source files")?;

    let source_count = source_classes.len();
    target.extend(source_classes);
    Ok((target, source_count))
}

fn fail_status(fail_on_orphans: bool, result: &ClassificationResult) -> Status {
    if fail_on_orphans && result.has_orphans() {
        Status::Failure
    } else {
        Status::Success
    }
}

/// Trim whitespace left over from comma-separated lists and drop empty entries.
fn clean_paths(paths: &[Utf8PathBuf]) -> Vec<Utf8PathBuf> {
    paths
        .iter()
        .map(|p| p.as_str().trim())
        .filter(|p| !p.is_empty())
        .map(Utf8PathBuf::from)
        .collect()
}

fn display_name(path: &str) -> &str {
    Utf8Path::new(path).file_name().unwrap_or(path)
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    writeln!(out, "{}", json)?;
    Ok(())
}

fn write_list(out: &mut dyn Write, items: &[String], limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(usize::MAX);
    for item in items.iter().take(limit) {
        writeln!(out, "  - {}", item)?;
    }
    if items.len() > limit {
        writeln!(out, "  ... and {} more", items.len() - limit)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MockClassSource;
    use crate::models::class_set;
    use std::sync::atomic::Ordering;

    fn test_context() -> CommandContext {
        CommandContext::new(ToolSettings::default(), "cssguard.yaml".into(), false)
    }

    #[test]
    fn test_collect_records_source_metrics() {
        let ctx = test_context();

        let mut html = MockClassSource::new();
        html.expect_collect()
            .times(1)
            .returning(|| Ok(class_set(["flex", "p-4"])));
        html.expect_describe().returning(|| "html".to_string());

        let mut src = MockClassSource::new();
        src.expect_collect()
            .times(1)
            .returning(|| Ok(class_set(["p-4", "space-y-2", "grid"])));
        src.expect_describe().returning(|| "src".to_string());

        let mut target = ctx.collect(&html).unwrap();
        target.extend(ctx.collect(&src).unwrap());

        assert_eq!(target, class_set(["flex", "grid", "p-4", "space-y-2"]));
        assert_eq!(ctx.metrics.sources_collected.load(Ordering::Relaxed), 2);
        assert_eq!(ctx.metrics.classes_extracted.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_collect_failure_names_source() {
        let ctx = test_context();

        let mut broken = MockClassSource::new();
        broken
            .expect_collect()
            .returning(|| Err(anyhow::anyhow!("disk on fire")));
        broken
            .expect_describe()
            .returning(|| "broken source".to_string());

        let err = ctx.collect(&broken).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("broken source"));
        assert!(message.contains("disk on fire"));
        assert_eq!(ctx.metrics.sources_collected.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_clean_paths() {
        let paths = vec![
            Utf8PathBuf::from(" a.css"),
            Utf8PathBuf::from(""),
            Utf8PathBuf::from("dir/b.css "),
        ];
        assert_eq!(
            clean_paths(&paths),
            vec![Utf8PathBuf::from("a.css"), Utf8PathBuf::from("dir/b.css")]
        );
    }

    #[test]
    fn test_write_list_with_limit() {
        let items: Vec<String> = (0..5).map(|i| format!("c{}", i)).collect();
        let mut out = Vec::new();
        write_list(&mut out, &items, Some(3)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "  - c0\n  - c1\n  - c2\n  ... and 2 more\n");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("styles/main.css"), "main.css");
        assert_eq!(display_name("main.css"), "main.css");
    }

    #[test]
    fn test_version_command() {
        let ctx = test_context();
        let mut out = Vec::new();

        let status = run(&Commands::Version, &ctx, &mut out).unwrap();

        assert_eq!(status, Status::Success);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("cssguard v{}\n", VERSION)
        );
    }
}
