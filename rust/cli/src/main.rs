use std::io;

fn main() {
    if let Err(e) = hupoker_cli::logging::init_logging() {
        eprintln!("WARNING: logging disabled: {}", e);
    }
    let code = hupoker_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
