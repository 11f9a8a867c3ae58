use anyhow::{Context, Result};
use console::{Term, style};
use log::{info, warn};
use picture_library::config::Config;
use picture_library::init;
use picture_library::menu::{AppContext, show_main_menu};
use picture_library::signal::setup_shutdown_signal;
use picture_library::store::Store;

fn main() -> Result<()> {
    init::init();
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal();

    let config = Config::new()?;
    let store = Store::open(&config.options.database_path).with_context(|| {
        format!(
            "opening library database {}",
            config.options.database_path.display()
        )
    })?;

    let ctx = AppContext { config, store };

    loop {
        match show_main_menu(&term, &shutdown_signal, &ctx) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style("Goodbye!").green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style("Error:").red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
