//! CLI entrypoint for `cargo-balau`.

use cargo_balau::{cli, config, logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::parse();
    logging::init(args.verbose);
    let config = config::load(&args)?;
    cargo_balau::run(&config)?;
    Ok(())
}
