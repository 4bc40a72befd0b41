use std::process::ExitCode;

fn main() -> ExitCode {
    match modeswitch::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "modeswitch failed");
            ExitCode::FAILURE
        }
    }
}
