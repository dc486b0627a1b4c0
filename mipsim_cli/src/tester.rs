use std::collections::HashMap;
use std::path::Path;

use clap::Args;
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};

use mipsim_core::emulator::{DataMemory, EmulatorState, InstructionMemory};

///
/// Runs each instruction image against each expected final state, outputing
/// the score for each image
///
#[derive(Args, Debug)]
#[command(about)]
pub struct TestArgs {
    /// Folder containing the images to be simulated
    #[arg(long, default_value_t = String::from("programs"))]
    programs: String,

    /// Folder containing the tests to be run
    #[arg(long, default_value_t = String::from("tests"))]
    tests: String,

    /// Maximum number of clock cycles to simulate an image
    #[arg(short, long, default_value_t = 500)]
    cycles: usize,
}

#[derive(Args, Debug)]
#[command(about)]
/// Create scaffolding folder for a new project
pub struct NewArgs {
    /// Name of the new folder containing the scaffolding
    name: String,
}

/// Final state a test expects: register and data-memory values as
/// big-endian hex words. Anything not listed is unconstrained.
#[derive(Debug, Deserialize, Serialize, Default)]
struct ExpectedState {
    registers: HashMap<u8, HexValue>,
    data_memory: HashMap<HexValue, HexValue>,
}

#[derive(Serialize, Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
struct HexValue {
    #[serde(with = "hex::serde")]
    value: [u8; 4],
}

impl HexValue {
    fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.value)
    }
}

const EXAMPLE_JSON: &str = r##"
{
    "registers": {
        "8": "00000005",
        "9": "00000005",
        "10": "0000000a",
        "2": "0000000a"
    },
    "data_memory": {
        "00000000": "0000000a"
    }
}
"##;

pub fn new_project(args: NewArgs) -> Result<()> {
    // create the new project folder relative to the current directory
    let project_path = Path::new(&args.name);
    if project_path.exists() {
        return Err(eyre!("folder {} already exists", args.name));
    }
    std::fs::create_dir(project_path).wrap_err("failed to create project directory")?;

    let programs_path = project_path.join("programs");
    std::fs::create_dir(&programs_path).wrap_err("failed to create programs directory")?;

    let tests_path = project_path.join("tests");
    std::fs::create_dir(&tests_path).wrap_err("failed to create tests directory")?;

    // populate an example image and its expected final state
    let test_path = tests_path.join("example_test");
    std::fs::create_dir(&test_path).wrap_err("failed to create example test directory")?;
    std::fs::write(
        programs_path.join("example_image.txt"),
        include_str!("example_image.txt"),
    )
    .wrap_err("failed to create example image")?;
    std::fs::write(test_path.join("final_state.json"), EXAMPLE_JSON)
        .wrap_err("failed to create final state file")?;

    println!("created {}", args.name);
    Ok(())
}

pub fn run_tests(args: TestArgs) -> Result<()> {
    let images = collect_images(&args.programs)?;
    let tests = collect_tests(&args.tests)?;
    if images.is_empty() {
        return Err(eyre!("no images found in {}", args.programs));
    }
    if tests.is_empty() {
        return Err(eyre!("no tests found in {}", args.tests));
    }

    let mut all_passed = true;
    for (image_name, image_path) in &images {
        let mut passed = 0;
        for (test_name, expected) in &tests {
            match run_one(image_path, expected, args.cycles) {
                Ok(mismatches) if mismatches.is_empty() => passed += 1,
                Ok(mismatches) => {
                    for m in mismatches {
                        println!("  {image_name} / {test_name}: {m}");
                    }
                }
                Err(err) => println!("  {image_name} / {test_name}: {err}"),
            }
        }
        all_passed &= passed == tests.len();
        println!("{image_name}: {passed}/{} tests passed", tests.len());
    }

    if all_passed {
        Ok(())
    } else {
        Err(eyre!("some tests failed"))
    }
}

fn collect_images(dir: &str) -> Result<Vec<(String, String)>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).wrap_err_with(|| format!("failed to read {dir}"))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            images.push((name, path.to_string_lossy().into_owned()));
        }
    }
    images.sort();
    Ok(images)
}

fn collect_tests(dir: &str) -> Result<Vec<(String, ExpectedState)>> {
    let mut tests = Vec::new();
    for entry in std::fs::read_dir(dir).wrap_err_with(|| format!("failed to read {dir}"))? {
        let path = entry?.path();
        let state_path = path.join("final_state.json");
        if !state_path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = std::fs::read_to_string(&state_path)
            .wrap_err_with(|| format!("failed to read {}", state_path.display()))?;
        let expected: ExpectedState = serde_json::from_str(&text)
            .wrap_err_with(|| format!("malformed {}", state_path.display()))?;
        tests.push((name, expected));
    }
    tests.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(tests)
}

fn run_one(image_path: &str, expected: &ExpectedState, cycles: usize) -> Result<Vec<String>> {
    let words = crate::load_image(image_path)?;
    let imem = InstructionMemory::load(words, InstructionMemory::DEFAULT_CAPACITY)?;
    let (state, _) = crate::simulate(&imem, DataMemory::DEFAULT_WORDS, cycles)?;
    Ok(compare(&state, expected))
}

fn compare(state: &EmulatorState, expected: &ExpectedState) -> Vec<String> {
    let mut mismatches = Vec::new();
    for (&reg, &want) in &expected.registers {
        let got = state.registers()[reg as usize];
        if got != want.as_u32() {
            mismatches.push(format!(
                "x{reg} = {got:#010x}, expected {:#010x}",
                want.as_u32()
            ));
        }
    }
    for (&address, &want) in &expected.data_memory {
        let got = state.data_memory().read(address.as_u32()).unwrap_or(0);
        if got != want.as_u32() {
            mismatches.push(format!(
                "d_mem[{:#010x}] = {got:#010x}, expected {:#010x}",
                address.as_u32(),
                want.as_u32()
            ));
        }
    }
    mismatches.sort();
    mismatches
}
