use crate::cli::{args::UpcaseArgs, global::GlobalArgs};
use simd_upcase::{Settings, Tier, Upcaser};
use std::fs;
use std::io::{self, Read, Write};

pub fn handle(
    args: UpcaseArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    // A forced tier bypasses the configured cap but not the hardware
    let upcaser = match &args.tier {
        Some(name) => Upcaser::with_tier(name.parse::<Tier>()?)?,
        None => settings.upcaser(),
    };

    // Read input data
    let input_data = if let Some(file_path) = &args.file {
        fs::read(file_path)
            .map_err(|e| format!("cannot read '{}': {}", file_path.display(), e))?
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        buffer
    };

    if args.tier.is_some() && !input_data.is_ascii() && !global.quiet {
        eprintln!(
            "Note: input is not ASCII, {} kernel bypassed",
            upcaser.instruction_set()
        );
    }

    let output = upcaser.upcase(&input_data);
    tracing::debug!(
        bytes = input_data.len(),
        kernel = upcaser.instruction_set(),
        "upcased input"
    );

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)
            .map_err(|e| format!("cannot write '{}': {}", output_path.display(), e))?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&output)?;
        stdout.flush()?;
    }

    Ok(())
}
