use crate::config::Config;
use crate::menu::handlers::{
    run_create_album, run_create_folder, run_list_album_pictures, run_show_tree,
    show_settings_menu,
};
use crate::store::Store;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Everything the menu handlers need, opened once at startup.
pub struct AppContext {
    pub config: Config,
    pub store: Store,
}

/// Show the main menu once. Returns `false` when the program should exit.
pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    ctx: &AppContext,
) -> Result<bool> {
    if shutdown_signal.load(Ordering::SeqCst) {
        return Ok(false);
    }

    term.clear_screen()?;

    println!("{}", style("=== Picture Library ===").cyan().bold());
    println!("{}", style("Press ESC to exit").dim());

    let options = vec![
        "Create folder",
        "Create album",
        "Show library tree",
        "List album pictures",
        "Settings",
        "Exit",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select an action")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => run_create_folder(term, ctx)?,
        Some(1) => run_create_album(term, ctx)?,
        Some(2) => run_show_tree(term, ctx)?,
        Some(3) => run_list_album_pictures(term, ctx)?,
        Some(4) => show_settings_menu(term, ctx)?,
        Some(5) | None => return Ok(false),
        _ => unreachable!(),
    }

    Ok(!shutdown_signal.load(Ordering::SeqCst))
}
