use dotenvy::dotenv;
use log::info;

use pow_ledger::config::{Config, OutputFormat};
use pow_ledger::{Blockchain, Miner, Result, report};

const DEMO_PAYLOADS: [&str; 2] = ["Send 1 BTC to Alex", "Send 2 BTC to Ben"];

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env()?;
    info!(
        "Creating a new blockchain (difficulty={}, miner_threads={})...",
        cfg.difficulty, cfg.miner_threads
    );
    let miner = Miner::parallel(cfg.difficulty, cfg.miner_threads)?;
    let mut bc = Blockchain::with_miner(miner)?;
    info!("Blockchain created!");

    for (i, payload) in DEMO_PAYLOADS.iter().enumerate() {
        info!("Mining block {} ({})...", i + 1, payload);
        bc.append(*payload)?;
        info!("Block {} added.", i + 1);
    }

    bc.validate()?;

    match cfg.output {
        OutputFormat::Text => {
            info!("--- Printing Blockchain ---");
            print!("{}", report::render_text(&bc));
        }
        OutputFormat::Json => println!("{}", report::render_json(&bc)?),
    }

    Ok(())
}
