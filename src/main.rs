use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "latchkey", about = "File drop service and door lock sequencer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Accept multipart uploads and serve them back
    #[cfg(feature = "web")]
    Serve(ServeArgs),
    /// Drive the lock stepper through one unlock, hold, lock cycle
    OpenDoor(DoorArgs),
}

#[cfg(feature = "web")]
#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Directory uploads are written to (created on first upload)
    #[arg(long, value_name = "DIR", default_value = "uploads")]
    upload_dir: std::path::PathBuf,

    /// Return `/uploads/<name>` or a fully qualified URL
    #[arg(long, value_enum, default_value_t = latchkey::UrlStyle::Relative)]
    url_style: latchkey::UrlStyle,

    /// Base for absolute URLs, e.g. https://files.example.com
    #[arg(long, value_name = "URL")]
    public_url: Option<String>,

    /// Reject request bodies larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    max_upload_bytes: Option<usize>,
}

#[derive(Args, Debug)]
struct DoorArgs {
    /// GPIO character device
    #[arg(long, value_name = "PATH", default_value = "/dev/gpiochip0")]
    chip: String,

    #[arg(long, default_value_t = 17)]
    pin_a: u32,

    #[arg(long, default_value_t = 27)]
    pin_b: u32,

    /// Seconds to drive the motor open
    #[arg(long, default_value_t = 3)]
    unlock_secs: u64,

    /// Seconds to leave the door unlocked with the motor stopped
    #[arg(long, default_value_t = 20)]
    hold_secs: u64,

    /// Seconds to drive the motor closed
    #[arg(long, default_value_t = 3)]
    lock_secs: u64,
}

fn main() {
    let cli = Cli::parse();
    latchkey::telemetry::init_tracing();

    match cli.command {
        #[cfg(feature = "web")]
        Command::Serve(args) => {
            let config = latchkey::ServerConfig {
                host: args.host,
                port: args.port,
                upload_dir: args.upload_dir,
                url_style: args.url_style,
                public_url: args.public_url,
                max_upload_bytes: args.max_upload_bytes,
            };
            if let Err(err) = latchkey::run_server(config) {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
        Command::OpenDoor(args) => open_door(args),
    }
}

#[cfg(target_os = "linux")]
fn open_door(args: DoorArgs) {
    use latchkey::door::{DoorConfig, DoorSequence, Pins};
    use std::time::Duration;

    let config = DoorConfig {
        gpio_chip: args.chip,
        pins: Pins {
            a: args.pin_a,
            b: args.pin_b,
        },
        sequence: DoorSequence::new(
            Duration::from_secs(args.unlock_secs),
            Duration::from_secs(args.hold_secs),
            Duration::from_secs(args.lock_secs),
        ),
    };

    if let Err(err) = latchkey::door::open_door(&config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_os = "linux"))]
fn open_door(_args: DoorArgs) {
    eprintln!("Door control can only run on Linux targets.");
    std::process::exit(1);
}
