use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use javagadget::config::Config;
use javagadget::discovery::FileFinder;
use javagadget::exclusions::ExclusionRegistry;
use javagadget::inspections::{
    default_inspections, sort_diagnostics, Diagnostic, Rule,
};
use javagadget::parser::{ModelBuilder, ParallelModelBuilder};
use javagadget::refactor::{FileEditor, MakeStaticFix};
use javagadget::report::{ReportFormat, ReportOptions, Reporter};

/// javagadget - method-declaration inspections for Java
#[derive(Parser, Debug)]
#[command(name = "javagadget")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory (or single .java file) to inspect
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Glob patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Rules to run, by code (e.g. JG001); default is all
    #[arg(short, long, value_name = "CODE")]
    rule: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Apply available quick-fixes after reporting
    #[arg(long)]
    fix: bool,

    /// Dry run - show which fixes would be applied without editing files
    #[arg(long)]
    dry_run: bool,

    /// Skip methods with empty bodies in JG001 (overrides config)
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    ignore_empty_methods: Option<bool>,

    /// Only flag private or final methods in JG001 (overrides config)
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    only_private_or_final: Option<bool>,

    /// Enable parallel parsing (enabled by default)
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Compact,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    info!("javagadget v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let diagnostics = run_inspections(&config, &cli)?;

    if cli.fix || cli.dry_run {
        apply_fixes(&diagnostics, &cli)?;
    }

    if !diagnostics.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path).into_diagnostic()?
    } else {
        // Try to load from default locations
        Config::from_default_locations(&cli.path).into_diagnostic()?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if let Some(value) = cli.ignore_empty_methods {
        config.method_may_be_static.ignore_empty_methods = value;
    }
    if let Some(value) = cli.only_private_or_final {
        config.method_may_be_static.only_private_or_final = value;
    }

    Ok(config)
}

/// Which rules the user asked for, or all of them
fn selected_rules(cli: &Cli) -> Result<Option<Vec<Rule>>> {
    if cli.rule.is_empty() {
        return Ok(None);
    }
    let mut rules = Vec::new();
    for code in &cli.rule {
        let rule = Rule::from_code(code)
            .ok_or_else(|| miette::miette!("unknown rule code '{}'", code))?;
        rules.push(rule);
    }
    Ok(Some(rules))
}

fn run_inspections(config: &Config, cli: &Cli) -> Result<Vec<Diagnostic>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();
    let rules = selected_rules(cli)?;

    // Step 1: Discover files
    info!("Discovering files...");
    let finder = FileFinder::new(config);
    let files = finder.find_files(&cli.path).into_diagnostic()?;

    info!("Found {} files to inspect", files.len());

    if files.is_empty() {
        println!("{}", "No Java files found.".yellow());
        return Ok(Vec::new());
    }

    // Step 2: Parse files and build the source model
    let model = if cli.parallel {
        let parallel_builder = ParallelModelBuilder::new();
        parallel_builder.build_from_files(&files).into_diagnostic()?
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .into_diagnostic()?
                .progress_chars("#>-"),
        );

        info!("Parsing files...");
        let mut builder = ModelBuilder::new().into_diagnostic()?;
        for file in &files {
            builder.process_file(file).into_diagnostic()?;
            pb.inc(1);
        }
        pb.finish_with_message("Parsing complete");

        builder.build()
    };

    // Step 3: Run the inspections
    info!("Running inspections...");
    let exclusions = Arc::new(ExclusionRegistry::with_defaults());
    let mut diagnostics = Vec::new();
    for inspection in default_inspections(config.method_may_be_static_options(), exclusions) {
        if let Some(ref rules) = rules {
            if !rules.contains(&inspection.rule()) {
                continue;
            }
        }
        diagnostics.extend(inspection.inspect(&model));
    }
    sort_diagnostics(&mut diagnostics);

    info!("Found {} findings", diagnostics.len());

    // Step 4: Report results
    let report_format = match cli.format {
        OutputFormat::Terminal => ReportFormat::Terminal,
        OutputFormat::Compact => ReportFormat::Compact,
        OutputFormat::Json => ReportFormat::Json,
    };
    let options = ReportOptions {
        output_path: cli.output.clone(),
        base_path: cli.path.is_dir().then(|| cli.path.clone()),
        show_fix_hints: !cli.fix,
    };
    let reporter = Reporter::with_options(report_format, options);
    reporter.report(&diagnostics)?;

    let elapsed = start_time.elapsed();
    info!("Inspection completed in {:.2}s", elapsed.as_secs_f64());

    Ok(diagnostics)
}

/// Apply (or preview) every offered quick-fix, grouped per file.
///
/// Fixes within one file run highest-offset first, so the byte spans the
/// remaining fixes captured at scan time stay valid.
fn apply_fixes(diagnostics: &[Diagnostic], cli: &Cli) -> Result<()> {
    let mut by_file: BTreeMap<PathBuf, Vec<&MakeStaticFix>> = BTreeMap::new();
    for d in diagnostics {
        if let Some(fix) = &d.fix {
            by_file.entry(fix.path().to_path_buf()).or_default().push(fix);
        }
    }

    if by_file.is_empty() {
        if !cli.quiet {
            println!("{}", "No quick-fixes available.".yellow());
        }
        return Ok(());
    }

    if cli.dry_run {
        println!();
        println!("{}", "Quick-fixes that would be applied:".cyan().bold());
        for (file, fixes) in &by_file {
            for fix in fixes {
                println!("  {} {}: {}", "→".dimmed(), file.display(), fix.description());
            }
        }
        return Ok(());
    }

    let mut applied = 0usize;
    let mut failed = 0usize;
    for (file, mut fixes) in by_file {
        fixes.sort_by(|a, b| b.insert_byte().cmp(&a.insert_byte()));

        let mut editor = FileEditor::load(&file).into_diagnostic()?;
        for fix in fixes {
            match fix.apply_to(&mut editor) {
                Ok(()) => applied += 1,
                Err(e) => {
                    eprintln!("{}: {}", "Fix skipped".yellow(), e);
                    failed += 1;
                }
            }
        }
        editor.save().into_diagnostic()?;
    }

    println!(
        "{}",
        format!("✓ Applied {} quick-fix(es)", applied).green()
    );
    if failed > 0 {
        eprintln!("{}", format!("{} fix(es) skipped", failed).yellow());
    }
    Ok(())
}
