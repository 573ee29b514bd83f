use clap::Parser;
use log::{debug, error};
use std::process::ExitCode;

use winmul::{Natural, Recorder, WindowConfig, WindowMode, WindowedMultiplier};

/// Multiply SCALAR by OPERAND using fixed-window double-and-add.
///
/// Numbers are decimal, or hex/octal/binary with a 0x/0o/0b prefix.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	scalar: Natural,

	operand: Natural,

	/// Window width in bits (1 to 8)
	#[arg(short, long, default_value_t = winmul::window::DEFAULT_WIDTH)]
	window: usize,

	/// Drop a leading partial window instead of zero-padding it
	#[arg(long)]
	truncate: bool,

	/// Radix of the printed result (2 to 36)
	#[arg(short, long, default_value_t = 10)]
	radix: u32,

	/// Compare the result with the plain product and fail if they differ
	#[arg(long)]
	check: bool,

	/// Print the window values to stderr
	#[arg(long)]
	trace: bool,

	/// Increase log verbosity (may be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Silence all log output
	#[arg(short, long)]
	quiet: bool,
}

impl Args {
	fn config(&self) -> Result<WindowConfig, winmul::Error> {
		let mode = if self.truncate { WindowMode::Truncating } else { WindowMode::Full };
		Ok(WindowConfig::new(self.window)?.with_mode(mode))
	}
}

fn run(args: &Args) -> Result<bool, winmul::Error> {
	let multiplier = WindowedMultiplier::new(args.config()?)?;

	let mut recorder = Recorder::new();
	let product = multiplier.multiply_traced(&args.scalar, &args.operand, &mut recorder)?;
	println!("{}", product.to_str_radix(args.radix)?);

	if args.trace {
		for (i, value) in recorder.window_values().iter().enumerate() {
			eprintln!("window {}: {:#x}", i, value);
		}
	}

	if args.check {
		let expected = &args.scalar * &args.operand;
		if product != expected {
			error!("windowed product {} differs from plain product {}", product, expected);
			return Ok(false);
		}
		debug!("windowed product matches the plain product");
	}
	Ok(true)
}

fn main() -> ExitCode {
	let args = Args::parse();

	stderrlog::new()
		.module(module_path!())
		.quiet(args.quiet)
		.verbosity(args.verbose as usize + 1)
		.init()
		.ok();

	ExitCode::from(exit_status(run(&args)))
}

/// 0 on success, 1 when `--check` finds a mismatch, 2 on invalid input.
fn exit_status(result: Result<bool, winmul::Error>) -> u8 {
	match result {
		Ok(true) => 0,
		Ok(false) => 1,
		Err(e) => {
			error!("{}", e);
			2
		},
	}
}
