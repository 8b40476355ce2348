//! Terminal runner: load a raw program image, execute a bounded number of
//! instructions, and print the register and memory state.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cpu_z80::{Memory, Registers};

mod display;
mod loader;

#[derive(Parser)]
#[command(version, about = "Run a raw Z80 program image")]
struct Args {
    /// Raw program image, loaded at address 0x0000.
    #[arg(long)]
    image: PathBuf,

    /// Number of instructions to execute.
    #[arg(short = 'n', long)]
    steps: u64,

    /// Suppress the register and memory display.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("z80-runner: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut mem = Memory::new();
    let loaded = loader::load_image(&mut mem, &args.image)?;
    if !args.quiet {
        println!("Loaded {loaded} bytes from {}", args.image.display());
    }

    let mut regs = Registers::new();
    let result = cpu_z80::run(&mut regs, &mut mem, args.steps);

    // --quiet only silences the display; faults still go to stderr.
    if !args.quiet {
        print!("{}", display::registers(&regs));
        print!("{}", display::memory(&mem));
    }

    let executed = result?;
    if !args.quiet {
        println!("Executed {executed} instructions");
    }
    Ok(())
}
