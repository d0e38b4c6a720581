use std::path::Path;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use schemadoc_cli::Commands;
use schemadoc_cli::SchemaDocCli;
use schemadoc_core::AnyResult;
use schemadoc_core::DefinitionWarning;
use schemadoc_core::RenderedDocument;
use schemadoc_core::SchemaDocConfig;
use schemadoc_core::SchemaDocError;
use schemadoc_core::SchemaRenderer;
use schemadoc_core::source::load_schema;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SchemaDocCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Generate { input, output }) => {
			run_generate(&args, input, output.as_deref()).map(|()| true)
		}
		Some(Commands::Check {
			input,
			output,
			diff,
		}) => run_check(&args, input, output, *diff),
		None => {
			eprintln!("No subcommand specified. Run `schemadoc --help` for usage.");
			process::exit(1);
		}
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			// Try to render through miette for rich diagnostics with help text
			// and error codes.
			match e.downcast::<SchemaDocError>() {
				Ok(err) => {
					let report: miette::Report = (*err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

/// Library events go to stderr. Only errors are shown unless `--verbose` or
/// `RUST_LOG` asks for more.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "error" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn load_config(args: &SchemaDocCli) -> AnyResult<Option<SchemaDocConfig>> {
	if let Some(path) = &args.config {
		return Ok(Some(SchemaDocConfig::load_file(path)?));
	}

	let cwd = std::env::current_dir()?;
	Ok(SchemaDocConfig::load(&cwd)?)
}

fn render(args: &SchemaDocCli, input: &Path) -> AnyResult<RenderedDocument> {
	let config = load_config(args)?;
	let renderer = SchemaRenderer::new(args.render_options(config))?;
	tracing::debug!(options = ?renderer.options(), "rendering schema");
	let schema = load_schema(input)?;
	let document = renderer.render(&schema)?;

	if document.has_warnings() {
		print_definition_warnings(&document.warnings);
	}

	Ok(document)
}

fn run_generate(args: &SchemaDocCli, input: &Path, output: Option<&Path>) -> AnyResult<()> {
	let document = render(args, input)?;
	let markdown = document.to_markdown();

	match output {
		Some(path) => {
			std::fs::write(path, &markdown)?;
			tracing::debug!(output = %path.display(), "wrote documentation");
			if args.verbose {
				println!(
					"Wrote {} ({} fragment(s)).",
					path.display(),
					document.fragments().len()
				);
			}
		}
		None => print!("{markdown}"),
	}

	Ok(())
}

/// Returns `Ok(false)` when the existing file is out of date.
fn run_check(args: &SchemaDocCli, input: &Path, output: &Path, show_diff: bool) -> AnyResult<bool> {
	let expected = render(args, input)?.to_markdown();
	let current = std::fs::read_to_string(output)?;

	if current == expected {
		println!("Check passed: {} is up to date.", output.display());
		return Ok(true);
	}

	let report: miette::Report = SchemaDocError::OutdatedOutput {
		path: output.display().to_string(),
	}
	.into();
	eprintln!("{report:?}");

	if show_diff {
		print_diff(&current, &expected);
	}

	Ok(false)
}

fn print_definition_warnings(warnings: &[DefinitionWarning]) {
	for warning in warnings {
		eprintln!(
			"{} skipped `{}` from `{}`: {}",
			colored!("warning:", yellow),
			warning.name,
			warning.section,
			warning.message
		);
	}
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
