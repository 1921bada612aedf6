use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = post_finalize::cli::parse();
    app::run(args)
}
