use crate::component::HierarchyManager;
use crate::component::hierarchy::CreateNodeRequest;
use crate::config::SettingsService;
use crate::error::LibraryError;
use crate::menu::main_menu::AppContext;
use crate::model::{HierarchyNode, NodeType, Settings, ThemeMode};
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::path::PathBuf;

fn print_error(e: &LibraryError) {
    eprintln!("{} {}", style(format!("[{}]", e.kind())).red().bold(), e);
}

/// Let the user pick a parent folder. `Ok(None)` means ESC, `Some(None)` the root.
fn select_parent(term: &Term, manager: &HierarchyManager<'_>) -> Result<Option<Option<i64>>> {
    let folders = manager.list_nodes(NodeType::Folder)?;

    let mut items = vec!["(library root)".to_string()];
    items.extend(folders.iter().map(|f| format!("{} (#{})", f.name, f.id)));

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Parent folder")
        .items(&items)
        .default(0)
        .interact_on_opt(term)?;

    Ok(selection.map(|i| i.checked_sub(1).map(|slot| folders[slot].id)))
}

fn prompt_name(term: &Term, prompt: &str) -> Result<String> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text_on(term)?;
    Ok(name)
}

pub fn run_create_folder(term: &Term, ctx: &AppContext) -> Result<()> {
    term.clear_screen()?;
    println!("{}", style("=== Create folder ===").cyan().bold());

    let manager = HierarchyManager::new(&ctx.store, &ctx.config);
    let Some(parent_id) = select_parent(term, &manager)? else {
        return Ok(());
    };
    let name = prompt_name(term, "Folder name")?;

    match manager.create_node(CreateNodeRequest::folder(parent_id, name)) {
        Ok(node) => println!(
            "{} {} (#{})",
            style("Folder created:").green(),
            node.name,
            node.id
        ),
        Err(e) => print_error(&e),
    }

    pause(term)?;
    Ok(())
}

pub fn run_create_album(term: &Term, ctx: &AppContext) -> Result<()> {
    term.clear_screen()?;
    println!("{}", style("=== Create album ===").cyan().bold());

    let manager = HierarchyManager::new(&ctx.store, &ctx.config).with_progress(true);
    let Some(parent_id) = select_parent(term, &manager)? else {
        return Ok(());
    };
    let name = prompt_name(term, "Album name")?;

    let source: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Import from directory (leave empty to skip)")
        .allow_empty(true)
        .interact_text_on(term)?;
    let source = source.trim();

    let mut request = CreateNodeRequest::album(parent_id, name);
    if !source.is_empty() {
        request = request.with_source_path(PathBuf::from(source));
    }

    match manager.create_node(request) {
        Ok(node) => {
            println!(
                "{} {} (#{})",
                style("Album created:").green(),
                node.name,
                node.id
            );
            if let Some(location) = &node.location {
                println!("  {} {}", style("Location:").dim(), location.display());
            }
        }
        Err(LibraryError::NodeCreatedImportFailed { node, source }) => {
            println!(
                "{} {} (#{})",
                style("Album created:").yellow(),
                node.name,
                node.id
            );
            print_error(&source);
        }
        Err(e) => print_error(&e),
    }

    pause(term)?;
    Ok(())
}

fn print_tree(roots: &[HierarchyNode]) {
    // depth-first, children pushed in reverse so they print in order
    let mut pending: Vec<(&HierarchyNode, usize)> = roots.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = pending.pop() {
        let indent = "  ".repeat(depth);
        if node.is_album() {
            let pictures: usize = node.sub_folders.iter().map(|sf| sf.pictures.len()).sum();
            println!(
                "{indent}{} {} {}",
                style("[album]").magenta(),
                node.name,
                style(format!("({pictures} pictures)")).dim()
            );
        } else {
            println!("{indent}{} {}", style("[folder]").blue(), node.name);
        }
        pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    let total: usize = roots.iter().map(HierarchyNode::subtree_len).sum();
    println!("\n{}", style(format!("{total} node(s)")).dim());
}

pub fn run_show_tree(term: &Term, ctx: &AppContext) -> Result<()> {
    term.clear_screen()?;
    println!("{}", style("=== Library tree ===").cyan().bold());

    match HierarchyManager::new(&ctx.store, &ctx.config).get_full_hierarchy() {
        Ok(roots) if roots.is_empty() => println!("{}", style("The library is empty").dim()),
        Ok(roots) => print_tree(&roots),
        Err(e) => print_error(&e),
    }

    pause(term)?;
    Ok(())
}

pub fn run_list_album_pictures(term: &Term, ctx: &AppContext) -> Result<()> {
    term.clear_screen()?;
    println!("{}", style("=== Album pictures ===").cyan().bold());

    let albums = HierarchyManager::new(&ctx.store, &ctx.config).list_nodes(NodeType::Album)?;
    if albums.is_empty() {
        println!("{}", style("No albums yet").dim());
        pause(term)?;
        return Ok(());
    }

    let items: Vec<String> = albums.iter().map(|a| format!("{} (#{})", a.name, a.id)).collect();
    let Some(selection) = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Album")
        .items(&items)
        .default(0)
        .interact_on_opt(term)?
    else {
        return Ok(());
    };

    match ctx.store.find_pictures_by_node(albums[selection].id) {
        Ok(pictures) if pictures.is_empty() => println!("{}", style("No pictures").dim()),
        Ok(pictures) => {
            for picture in pictures {
                println!(
                    "{} {:<8} {}",
                    picture.index,
                    picture.picture_type.as_str(),
                    picture.location.display()
                );
            }
        }
        Err(e) => print_error(&e),
    }

    pause(term)?;
    Ok(())
}

pub fn show_settings_menu(term: &Term, ctx: &AppContext) -> Result<()> {
    let service = SettingsService::new(&ctx.store, &ctx.config.options);

    loop {
        term.clear_screen()?;

        let settings = service.get_settings()?;
        println!("{}", style("=== Settings ===").cyan().bold());
        println!("{}", style("Press ESC to go back").dim());
        println!(
            "\n{} {}\n{} {}\n",
            style("Theme:").dim(),
            settings.theme_mode,
            style("Library root:").dim(),
            service.resolve_library_root()?.display()
        );

        let options = vec!["Theme", "Library path", "Back"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a setting")
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        let updated = match selection {
            Some(0) => select_theme(term, &settings)?,
            Some(1) => edit_library_path(term, &settings)?,
            Some(2) | None => break,
            _ => unreachable!(),
        };

        if let Some(updated) = updated.filter(|s| *s != settings) {
            service.update_settings(&updated)?;
            println!("\n{}", style("Settings saved").green());
            std::thread::sleep(std::time::Duration::from_secs(1));
        }
    }

    Ok(())
}

fn select_theme(term: &Term, settings: &Settings) -> Result<Option<Settings>> {
    let items: Vec<&str> = ThemeMode::ALL.iter().map(ThemeMode::as_str).collect();
    let default_index = ThemeMode::ALL
        .iter()
        .position(|&m| m == settings.theme_mode)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Theme")
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    Ok(selection.map(|i| Settings {
        theme_mode: ThemeMode::ALL[i],
        ..settings.clone()
    }))
}

fn edit_library_path(term: &Term, settings: &Settings) -> Result<Option<Settings>> {
    let library_path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Library path (empty for default)")
        .with_initial_text(settings.library_path.clone())
        .allow_empty(true)
        .interact_text_on(term)?;

    Ok(Some(Settings {
        library_path: library_path.trim().to_string(),
        ..settings.clone()
    }))
}
