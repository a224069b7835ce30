use clap::Args;

/// Global arguments that apply to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Settings file applied on top of the user and local config
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Highest kernel tier the dispatcher may pick (avx2, avx, sse2, neon, default)
    #[arg(long, global = true, value_name = "TIER")]
    pub max_tier: Option<String>,

    /// Suppress informational notices
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
