use std::process::ExitCode;

mod app;
mod sim;

fn main() -> ExitCode {
    app::run()
}
