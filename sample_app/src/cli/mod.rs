use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sample_app")]
#[command(version, about = "Exercises dynarray containers end to end", long_about = None)]
pub struct Cli {
    /// Number of elements to push
    #[arg(short, long, default_value_t = 32)]
    pub count: usize,

    /// Set verbose level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
