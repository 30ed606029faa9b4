use clap::Parser;

/// Phase-bar planner demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of axis intervals (planning weeks)
    #[arg(short = 'w', long = "weeks", value_name = "N", default_value = "26")]
    pub weeks: i32,

    /// Number of sample estimate rows to generate
    #[arg(short = 'r', long = "rows", value_name = "N", default_value = "6")]
    pub rows: usize,

    /// Print the generated sample plan as JSON and exit
    #[arg(long = "dump")]
    pub dump: bool,

    /// Verbosity: -v info, -vv debug, -vvv trace
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
