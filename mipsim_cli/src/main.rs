use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use mipsim_core::emulator::{
    DataMemory, EmulatorError, EmulatorState, InstructionMemory,
};

mod tester;

#[derive(Parser, Debug)]
#[command(version, about = "Single-cycle MIPS datapath simulator")]
struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(RunArgs),
    Test(tester::TestArgs),
    New(tester::NewArgs),
}

///
/// Loads an instruction image, runs it for a fixed number of cycles, and
/// prints the final register and memory state
///
#[derive(Args, Debug)]
#[command(about)]
struct RunArgs {
    /// Instruction image: one hexadecimal word per line
    image: String,

    /// Number of clock cycles to simulate
    #[arg(short, long, default_value_t = 500)]
    cycles: usize,

    /// Size of the data memory, in words
    #[arg(long, default_value_t = DataMemory::DEFAULT_WORDS)]
    memory_words: usize,

    /// Print all 32 registers instead of only the non-zero ones
    #[arg(long)]
    all_registers: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Arguments::parse();
    match args.command {
        Command::Run(run_args) => run(run_args),
        Command::Test(test_args) => tester::run_tests(test_args),
        Command::New(new_args) => tester::new_project(new_args),
    }
}

/// Parse a text image: one hex word per line, blank lines and `#` comments
/// ignored. A malformed line is rejected before any cycle executes.
fn load_image(path: &str) -> Result<Vec<u32>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read image {path}"))?;

    let mut words = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("0x").unwrap_or(line);
        let word = u32::from_str_radix(line, 16)
            .wrap_err_with(|| format!("{path}:{}: malformed word {line:?}", line_num + 1))?;
        words.push(word);
    }
    Ok(words)
}

fn run(args: RunArgs) -> Result<()> {
    let words = load_image(&args.image)?;
    let imem = InstructionMemory::load(words, InstructionMemory::DEFAULT_CAPACITY)?;

    let (state, cycles) = simulate(&imem, args.memory_words, args.cycles)?;

    println!("pc: {}", state.pc());
    println!("registers:");
    for i in 0..32 {
        let value = state.registers()[i];
        if args.all_registers || value != 0 {
            println!("  x{i:<2} = {value:#010x}");
        }
    }
    println!("data memory (non-zero words):");
    for (address, &value) in state.data_memory().words().iter().enumerate() {
        if value != 0 {
            println!("  [{address:#010x}] = {value:#010x}");
        }
    }
    println!("({cycles} cycles)");
    Ok(())
}

/// Step up to `max_cycles`. Running off the end of the image is the normal
/// halt condition for a program shorter than the cycle budget; every other
/// error is reported and stops the run.
fn simulate(
    imem: &InstructionMemory,
    memory_words: usize,
    max_cycles: usize,
) -> Result<(EmulatorState, usize)> {
    let mut state = EmulatorState::with_data_memory(DataMemory::new(memory_words));
    for cycle in 0..max_cycles {
        match state.clock(imem) {
            Ok(next) => state = next,
            Err(EmulatorError::FetchOutOfRange { .. }) => {
                println!("halted after {cycle} cycles: ran off the end of the image");
                return Ok((state, cycle));
            }
            Err(err) => {
                println!("stopped after {cycle} cycles: {err}");
                return Ok((state, cycle));
            }
        }
    }
    Ok((state, max_cycles))
}
