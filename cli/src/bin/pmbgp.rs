use std::process::ExitCode;

fn main() -> ExitCode {
    pmbgp_cli::main()
}
