//! Host CLI: encode LED commands and send them to the device.
//!
//! ```text
//! trinkeyctl black 12:red,10
//! trinkeyctl --device /dev/ttyACM1 24:blue,3
//! ```

use std::process::ExitCode;

use anyhow::Context;
use trinkey_touch::encode;
use trinkey_touch::host::{HostArgs, Invocation, USAGE, send_line};

fn main() -> ExitCode {
    let args = match HostArgs::parse(std::env::args().skip(1)) {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            return ExitCode::FAILURE;
        }
    };

    // Nothing is sent unless every token encodes.
    let line = match encode(&args.commands) {
        Ok(line) => line,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match send(&args, &line) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn send(args: &HostArgs, line: &str) -> anyhow::Result<()> {
    send_line(&args.device, args.baud, line)
        .with_context(|| format!("failed to write to {}", args.device.display()))
}
