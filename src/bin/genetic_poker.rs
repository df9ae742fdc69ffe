use genetic_poker::evolution::{Evolution, EvolutionConfig, EvolutionError};
use std::io::{self, BufWriter, Write};

fn main() -> Result<(), EvolutionError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("genetic-poker {}", genetic_poker::VERSION);

    let mut evolution = Evolution::new(EvolutionConfig::default())?;
    let mut out = BufWriter::new(io::stdout().lock());
    evolution.run(&mut out)?;
    out.flush()?;
    Ok(())
}
