use std::process;

fn main() {
    if let Err(e) = cogctl::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
