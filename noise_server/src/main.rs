use anyhow::Result;
use clap::{
    app_from_crate, crate_authors, crate_description, crate_name, crate_version, value_t, Arg,
};
use crossbeam_channel::Sender;
use noise_server::{run, Message, ServerConfig, CHANNEL_CAPACITY, DEFAULT_MAX_BLOCK_SIZE};
use std::io::BufRead;

fn main() -> Result<()> {
    simple_logger::init()?;

    let default_block_size = DEFAULT_MAX_BLOCK_SIZE.to_string();
    let default_channels = audio_block::CHANNELS.to_string();
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("block-size")
                .short("b")
                .long("block-size")
                .value_name("SAMPLES")
                .default_value(&default_block_size)
                .help("Largest block rendered in one go."),
        )
        .arg(
            Arg::with_name("channels")
                .short("c")
                .long("channels")
                .value_name("CHANNELS")
                .default_value(&default_channels)
                .help("Output channels to request from the device."),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("Seed for reproducible noise."),
        )
        .get_matches();

    let config = ServerConfig {
        max_block_size: value_t!(matches, "block-size", usize)?,
        output_channels: value_t!(matches, "channels", usize)?,
        seed: if matches.is_present("seed") {
            Some(value_t!(matches, "seed", u64)?)
        } else {
            None
        },
    };

    let (tx, rx) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
    tx.send(Message::Start)?;
    std::thread::Builder::new()
        .name("Console".to_string())
        .spawn(move || console(tx))?;

    run(config, rx)
}

/// Reads `start`/`stop` commands from stdin. `quit` or EOF ends the program.
fn console(tx: Sender<Message>) {
    log::info!("Commands: start, stop, quit.");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let msg = match line.as_ref().map(|s| s.trim()) {
            Ok("start") => Message::Start,
            Ok("stop") => Message::Stop,
            Ok("quit") | Err(_) => break,
            Ok(other) => {
                log::warn!("Unknown command: {}", other);
                continue;
            }
        };
        if tx.send(msg).is_err() {
            break;
        }
    }
}
