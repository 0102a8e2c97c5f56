use std::io::{self, BufWriter};

use anyhow::Context;
use log::debug;
use swapper::Config;

fn main() -> anyhow::Result<()> {
    if std::env::var("SWAPPER_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("SWAPPER_LOG")
            .write_style("SWAPPER_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    let config = Config::from_env()?;
    debug!("configuration: {config:?}");

    let input = io::stdin().lock();
    let output = BufWriter::new(io::stdout().lock());
    let datasets =
        swapper::run(input, output, config.seed).context("failed to process datasets")?;
    debug!("processed {datasets} datasets");
    Ok(())
}
