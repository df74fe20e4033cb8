// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use runtime::{PageSnapshot, TableRequest};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracker_app::EntryKind;
use tracker_store::{DraftStore, SqliteStorage, Storage, Theme, ThemeStore, draft_key};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `tracker --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    logging::init_logging(&config.log_config())?;

    let storage_path = config.storage_path()?;
    if options.print_storage_path {
        println!("{}", storage_path.display());
        return Ok(());
    }

    if options.check_only {
        let settings = config.enhancer_settings()?;
        open_storage(&config, &storage_path)?;
        info!(
            storage = %storage_path.display(),
            autosave_ms = settings.autosave_delay.as_millis() as u64,
            "configuration checked"
        );
        return Ok(());
    }

    match options.command {
        None => print_help(),
        Some(Command::Table {
            kind,
            snapshot,
            request,
            json,
        }) => {
            let page = PageSnapshot::load(&snapshot)?;
            let config = tracker_table::catalog::table_for(kind);
            let report = runtime::run_table(config, page, &request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }
        }
        Some(Command::Drafts(command)) => {
            let storage = open_storage(&config, &storage_path)?;
            let mut drafts = DraftStore::new(storage);
            print!("{}", run_drafts(&mut drafts, &command)?);
        }
        Some(Command::Theme(action)) => {
            let storage = open_storage(&config, &storage_path)?;
            let mut themes = ThemeStore::new(storage);
            println!("{}", run_theme(&mut themes, action)?.as_str());
        }
    }
    Ok(())
}

fn open_storage(config: &Config, path: &std::path::Path) -> Result<SqliteStorage> {
    let mut storage = SqliteStorage::open(path).with_context(|| {
        format!(
            "open storage {} -- if this path is wrong, set [storage].path or TRACKER_STORAGE_PATH",
            path.display()
        )
    })?;
    storage.set_quota_bytes(config.quota_bytes())?;
    Ok(storage)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DraftsCommand {
    List,
    Show(String),
    Clear(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Table {
        kind: EntryKind,
        snapshot: PathBuf,
        request: TableRequest,
        json: bool,
    },
    Drafts(DraftsCommand),
    Theme(ThemeAction),
}

fn run_drafts<S: Storage>(drafts: &mut DraftStore<S>, command: &DraftsCommand) -> Result<String> {
    match command {
        DraftsCommand::List => {
            let keys = drafts.keys()?;
            if keys.is_empty() {
                return Ok("no saved drafts\n".to_owned());
            }
            Ok(keys.into_iter().map(|key| format!("{key}\n")).collect())
        }
        DraftsCommand::Show(target) => {
            let key = draft_key(Some(target.as_str()), target);
            match drafts.load(&key)? {
                Some(draft) => Ok(format!("{}\n", serde_json::to_string_pretty(&draft)?)),
                None => Ok(format!("no draft saved under {key}\n")),
            }
        }
        DraftsCommand::Clear(target) => {
            let key = draft_key(Some(target.as_str()), target);
            drafts.clear(&key)?;
            info!(key = %key, "draft cleared");
            Ok(format!("cleared {key}\n"))
        }
    }
}

fn run_theme<S: Storage>(themes: &mut ThemeStore<S>, action: ThemeAction) -> Result<Theme> {
    match action {
        ThemeAction::Show => Ok(themes.load()),
        ThemeAction::Set(theme) => {
            themes.save(theme)?;
            Ok(theme)
        }
        ThemeAction::Toggle => Ok(themes.toggle()?),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_storage_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    command: Option<Command>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_storage_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
        command: None,
    };

    let args: Vec<String> = args.into_iter().map(|arg| arg.as_ref().to_owned()).collect();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-storage-path" => {
                options.print_storage_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            "table" => {
                options.command = Some(parse_table_args(&mut iter)?);
            }
            "drafts" => {
                options.command = Some(Command::Drafts(parse_drafts_args(&mut iter)?));
            }
            "theme" => {
                options.command = Some(Command::Theme(parse_theme_args(&mut iter)?));
            }
            unknown => {
                bail!("unknown argument {unknown:?}; run with --help to see supported options");
            }
        }
    }

    Ok(options)
}

fn parse_table_args(iter: &mut impl Iterator<Item = String>) -> Result<Command> {
    let kind_arg = iter
        .next()
        .ok_or_else(|| anyhow!("table requires a page kind: reading, drawing, or fitness"))?;
    let kind = EntryKind::parse(&kind_arg).ok_or_else(|| {
        anyhow!("unknown page kind {kind_arg:?}; use reading, drawing, or fitness")
    })?;
    let snapshot = iter
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("table requires a snapshot JSON path after the page kind"))?;

    let mut request = TableRequest::default();
    let mut json = false;
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--filter" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--filter requires <filter-id>=<value>"))?;
                let (id, value) = value.split_once('=').ok_or_else(|| {
                    anyhow!("--filter expects <filter-id>=<value>, got {value:?}")
                })?;
                request.filters.push((id.to_owned(), value.to_owned()));
            }
            "--sort" => {
                let column = iter
                    .next()
                    .ok_or_else(|| anyhow!("--sort requires a column header or index"))?;
                request.sorts.push(column);
            }
            "--json" => json = true,
            unknown => {
                bail!("unknown table option {unknown:?}; expected --filter, --sort, or --json")
            }
        }
    }

    Ok(Command::Table {
        kind,
        snapshot,
        request,
        json,
    })
}

fn parse_drafts_args(iter: &mut impl Iterator<Item = String>) -> Result<DraftsCommand> {
    let action = iter.next().unwrap_or_else(|| "list".to_owned());
    let command = match action.as_str() {
        "list" => DraftsCommand::List,
        "show" | "clear" => {
            let target = iter.next().ok_or_else(|| {
                anyhow!("drafts {action} requires a form action or page path, such as /reading/add")
            })?;
            if action == "show" {
                DraftsCommand::Show(target)
            } else {
                DraftsCommand::Clear(target)
            }
        }
        other => bail!("unknown drafts action {other:?}; use list, show, or clear"),
    };
    if let Some(extra) = iter.next() {
        bail!("unexpected argument {extra:?} after drafts {action}");
    }
    Ok(command)
}

fn parse_theme_args(iter: &mut impl Iterator<Item = String>) -> Result<ThemeAction> {
    let action = match iter.next().as_deref() {
        None => ThemeAction::Show,
        Some("toggle") => ThemeAction::Toggle,
        Some(value) => ThemeAction::Set(
            Theme::parse(value)
                .ok_or_else(|| anyhow!("unknown theme {value:?}; use light, dark, or toggle"))?,
        ),
    };
    if let Some(extra) = iter.next() {
        bail!("unexpected argument {extra:?} after theme");
    }
    Ok(action)
}

fn print_help() {
    println!("tracker");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-storage-path     Print resolved storage path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and storage");
    println!("  --help                   Show this help");
    println!();
    println!("  table <reading|drawing|fitness> <snapshot.json> [--filter id=value]... [--sort column]... [--json]");
    println!("  drafts [list | show <action-or-path> | clear <action-or-path>]");
    println!("  theme [light | dark | toggle]");
}

#[cfg(test)]
mod tests {
    use super::{
        CliOptions, Command, DraftsCommand, ThemeAction, parse_cli_args, run_drafts, run_theme,
    };
    use crate::runtime::TableRequest;
    use anyhow::Result;
    use std::path::PathBuf;
    use tracker_app::EntryKind;
    use tracker_store::{Draft, DraftStore, MemoryStorage, Theme, ThemeStore, draft_key};

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/tracker-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_storage_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
                command: None,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-storage-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(!options.print_config_path);
        assert!(options.print_storage_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        assert!(parse_cli_args(vec!["--help"], default_options_path())?.show_help);
        assert!(parse_cli_args(vec!["-h"], default_options_path())?.show_help);
        Ok(())
    }

    #[test]
    fn table_command_collects_filters_and_sorts_in_order() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--config",
                "/custom/config.toml",
                "table",
                "fitness",
                "page.json",
                "--filter",
                "status-filter=completed",
                "--sort",
                "Date",
                "--sort",
                "3",
                "--json",
            ],
            default_options_path(),
        )?;
        assert_eq!(
            options.command,
            Some(Command::Table {
                kind: EntryKind::Fitness,
                snapshot: PathBuf::from("page.json"),
                request: TableRequest {
                    filters: vec![("status-filter".to_owned(), "completed".to_owned())],
                    sorts: vec!["Date".to_owned(), "3".to_owned()],
                },
                json: true,
            })
        );
        Ok(())
    }

    #[test]
    fn table_command_rejects_bad_kind_and_filter_syntax() {
        let error = parse_cli_args(vec!["table", "cooking", "page.json"], default_options_path())
            .expect_err("unknown kind should fail");
        assert!(error.to_string().contains("reading, drawing, or fitness"));

        let error = parse_cli_args(
            vec!["table", "reading", "page.json", "--filter", "status"],
            default_options_path(),
        )
        .expect_err("filter without = should fail");
        assert!(error.to_string().contains("<filter-id>=<value>"));
    }

    #[test]
    fn drafts_and_theme_subcommands_parse() -> Result<()> {
        let list = parse_cli_args(vec!["drafts"], default_options_path())?;
        assert_eq!(list.command, Some(Command::Drafts(DraftsCommand::List)));

        let show = parse_cli_args(vec!["drafts", "show", "/reading/add"], default_options_path())?;
        assert_eq!(
            show.command,
            Some(Command::Drafts(DraftsCommand::Show("/reading/add".to_owned())))
        );

        let theme = parse_cli_args(vec!["theme", "dark"], default_options_path())?;
        assert_eq!(theme.command, Some(Command::Theme(ThemeAction::Set(Theme::Dark))));

        let error = parse_cli_args(vec!["drafts", "clear"], default_options_path())
            .expect_err("clear without target should fail");
        assert!(error.to_string().contains("form action or page path"));
        Ok(())
    }

    #[test]
    fn drafts_show_and_clear_use_the_form_key() -> Result<()> {
        let mut drafts = DraftStore::new(MemoryStorage::new());
        let key = draft_key(Some("/reading/add"), "/reading/add");
        let mut draft = Draft::new();
        draft.insert("title".to_owned(), "Momo".to_owned());
        drafts.save(&key, &draft)?;

        let listed = run_drafts(&mut drafts, &DraftsCommand::List)?;
        assert_eq!(listed, format!("{key}\n"));

        let shown = run_drafts(
            &mut drafts,
            &DraftsCommand::Show("/reading/add?user_id=2".to_owned()),
        )?;
        assert!(shown.contains("\"title\": \"Momo\""));

        run_drafts(&mut drafts, &DraftsCommand::Clear("/reading/add".to_owned()))?;
        assert_eq!(
            run_drafts(&mut drafts, &DraftsCommand::List)?,
            "no saved drafts\n"
        );
        Ok(())
    }

    #[test]
    fn theme_actions_persist() -> Result<()> {
        let mut themes = ThemeStore::new(MemoryStorage::new());
        assert_eq!(run_theme(&mut themes, ThemeAction::Show)?, Theme::Light);
        assert_eq!(run_theme(&mut themes, ThemeAction::Toggle)?, Theme::Dark);
        assert_eq!(run_theme(&mut themes, ThemeAction::Show)?, Theme::Dark);
        assert_eq!(
            run_theme(&mut themes, ThemeAction::Set(Theme::Light))?,
            Theme::Light
        );
        Ok(())
    }
}
