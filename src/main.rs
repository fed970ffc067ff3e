use std::process;

fn main() {
    if let Err(err) = pulseboard::app::run() {
        eprintln!("fatal: {err}");
        process::exit(1);
    }
}
