use cli_log::*;
use soundgate::{App, Settings};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    init_cli_log!("soundgate");
    color_eyre::install()?;
    let settings = Settings::from_env();
    info!("starting with {settings:?}");
    let terminal = ratatui::init();
    let result = App::new(settings).run(terminal);
    ratatui::restore();
    result
}
