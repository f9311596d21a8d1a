//! Command-line entry point for the Godot PCK tool
//!
//! Runs one batch command from the arguments, or starts the archive browser
//! when none matched.

use godot_pck_tool::cli;

fn main() {
    match cli::run_cli() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
