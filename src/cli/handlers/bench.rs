use crate::cli::{args::BenchArgs, global::GlobalArgs};
use rand::SeedableRng;
use rand::rngs::StdRng;
use simd_upcase::Settings;
use simd_upcase::bench::{Contender, Measurement, PlatformInfo, measure, random_ascii, verify_tiers};

pub fn handle(
    args: BenchArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let sizes = if args.sizes.is_empty() {
        settings.bench.sizes()
    } else {
        args.sizes
    };
    let iterations = args
        .iterations
        .unwrap_or_else(|| settings.bench.iterations())
        .max(1);
    let warmup = args.warmup.unwrap_or_else(|| settings.bench.warmup());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let platform = PlatformInfo::with_capabilities(settings.capabilities());
    let contenders = platform.contenders();

    if !global.quiet {
        println!("Platform: {}", platform.display());
        println!("{} iterations per size, {} warmup", iterations, warmup);
    }

    for size in sizes {
        let input = random_ascii(size, &mut rng);
        if let Err(tier) = verify_tiers(&input, &platform) {
            return Err(format!(
                "{} kernel output differs from to_ascii_uppercase at {} bytes",
                tier.label(),
                size
            )
            .into());
        }

        println!("\n{} bytes:", size);

        let mut baseline: Option<Measurement> = None;
        for &contender in &contenders {
            let Some(m) = measure(contender, &input, iterations, warmup) else {
                continue;
            };
            let speedup = baseline.as_ref().map_or(1.0, |b| m.speedup_over(b));
            println!(
                "  {:<8} {:>10.1} MiB/s  {:>12}/iter  {:>6.2}x",
                contender.to_string(),
                m.throughput_mib_s(),
                format!("{:.2?}", m.per_iteration()),
                speedup
            );
            if contender == Contender::Baseline {
                baseline = Some(m);
            }
        }
    }

    Ok(())
}
