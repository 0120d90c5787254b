//! labreport - fill experiment report templates

fn main() {
    env_logger::init();

    if let Err(err) = labreport_cli::run_cli() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
