//! usbrelay CLI: set one relay output on a USB HID relay board.

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use usb_relay_core::error::Result;
use usb_relay_core::hiddev::HiddevNode;
use usb_relay_core::{identity, relay, safety};

#[derive(Parser)]
#[command(
    name = "usbrelay",
    version,
    about = "Set a relay output on a USB HID relay board"
)]
struct Cli {
    /// Hiddev device node of the relay board.
    #[arg(
        short = 'd',
        long = "device",
        value_name = "PATH",
        default_value = usb_relay_core::DEFAULT_DEVICE_PATH
    )]
    device: PathBuf,

    /// Output value to write (0-255; each relay channel is one bit).
    #[arg(short = 'v', long = "value", value_name = "VALUE", default_value_t = 0)]
    value: u32,

    /// Relay index within the output report (0-7).
    #[arg(short = 'i', long = "index", value_name = "INDEX", default_value_t = 0)]
    index: u32,
}

fn run(cli: &Cli) -> Result<()> {
    // Validated before the device node is touched.
    let index = safety::validate_relay_index(cli.index)?;
    let value = safety::validate_relay_value(cli.value)?;
    debug!(device = %cli.device.display(), index, value, "arguments parsed");

    let node = HiddevNode::open(&cli.device)?;
    identity::verify_identity(&node)?;
    relay::set_relay(&node, index as u32, value as u32)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version are not failures; every other parse error
            // maps to exit 1, keeping code 2 reserved for product mismatch.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
