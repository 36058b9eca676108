mod cli;
mod filemaker;
mod logging;
mod meme;
mod project;
mod runner;
mod templates;

fn main() -> anyhow::Result<()> {
    logging::init();
    let app = cli::parse();
    runner::run(app)
}
