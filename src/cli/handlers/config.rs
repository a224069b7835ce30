use crate::cli::{args::ConfigArgs, global::GlobalArgs};
use simd_upcase::Settings;

pub fn handle(
    args: ConfigArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(settings)?);
        return Ok(());
    }

    if !global.quiet {
        if let Some(path) = Settings::user_config_path() {
            println!("# user config: {}", path.display());
        }
        if let Some(path) = &global.config {
            println!("# explicit config: {}", path);
        }
    }
    print!("{}", toml::to_string(settings)?);

    Ok(())
}
