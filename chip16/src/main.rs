use std::error::Error;
use std::path::PathBuf;

use log::error;

mod headless;
mod run;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            error!("expected a ROM file path");
            return Err("usage: chip16 <rom> [frames]".into());
        }
    };
    let frames = match args.next() {
        Some(count) => Some(count.parse::<u64>()?),
        None => None,
    };

    run::run(rom, frames)
}
