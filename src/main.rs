//! The `sun-avoidance` binary.

use clap::Parser;

use sun_avoidance::SunAvoidance;

fn main() {
    if let Err(e) = SunAvoidance::parse().run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
