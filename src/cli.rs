//! Command-line entry point (spec §6: "Single positional argument:
//! testcase number N").

use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Port-dock scheduler core")]
pub struct Cli {
    /// Testcase number N; input is read from `testcase<N>/input.txt`.
    pub testcase: u32,
}

impl Cli {
    pub fn input_path(&self) -> String {
        format!("testcase{}/input.txt", self.testcase)
    }
}
