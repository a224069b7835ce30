use crate::cli::{args::InfoArgs, global::GlobalArgs};
use simd_upcase::Settings;
use simd_upcase::bench::PlatformInfo;

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn handle(
    args: InfoArgs,
    _global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let platform = PlatformInfo::detect();
    let selected = settings.upcaser();
    let caps = &platform.capabilities;

    if args.json {
        let output = serde_json::json!({
            "arch": platform.arch,
            "capabilities": caps,
            "instruction_set": platform.instruction_set,
            "selected": selected.instruction_set(),
            "max_tier": settings.dispatch.max_tier,
            "tiers": platform.available_tiers(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let tiers: Vec<&str> = platform
        .available_tiers()
        .into_iter()
        .map(|tier| tier.label())
        .collect();

    println!("Platform: {}", platform.display());
    println!("  narrow (128-bit):        {}", yes_no(caps.narrow()));
    println!("  wide (256-bit):          {}", yes_no(caps.wide()));
    println!("  wide extended (256-bit): {}", yes_no(caps.wide_extended()));
    println!("Available tiers: {}", tiers.join(", "));
    println!("Best instruction set: {}", platform.instruction_set);
    match settings.dispatch.max_tier {
        Some(max) => println!(
            "Selected: {} (max_tier = {})",
            selected.instruction_set(),
            max.as_str()
        ),
        None => println!("Selected: {}", selected.instruction_set()),
    }

    Ok(())
}
