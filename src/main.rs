use argh::FromArgs;
use gag_console::io_adapters::EditorReader;
use gag_console::settings::DEFAULT_HISTORY_SIZE;
use gag_console::{DetachedController, Settings, Shell, fault, gag_commands, greeting};
use log::error;
use std::path::PathBuf;

#[derive(FromArgs)]
/// Interactive console for inspecting and editing genome annotations.
struct Options {
    #[argh(option)]
    /// file the command history is read from and written to (default: ./.gaghistory)
    history_file: Option<PathBuf>,

    #[argh(option, default = "DEFAULT_HISTORY_SIZE")]
    /// maximum number of history lines to keep
    history_size: usize,

    #[argh(switch, short = 'q')]
    /// do not print the welcome banner
    quiet: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    fault::install_panic_hook();

    let options: Options = argh::from_env();
    let mut settings = Settings::new()
        .with_history_size(options.history_size)
        .with_greeting(!options.quiet);
    if let Some(path) = options.history_file {
        settings = settings.with_history_file(path);
    }

    let mut shell = Shell::new(settings, gag_commands(), Box::new(DetachedController));
    if shell.settings().greeting {
        println!("{}", greeting());
    }

    let mut reader = match EditorReader::new(shell.history()) {
        Ok(reader) => reader,
        Err(err) => {
            error!("cannot start line editor: {err:#}");
            return;
        }
    };
    if let Err(err) = shell.run(&mut reader, &mut std::io::stdout()) {
        error!("console output failed: {err}");
    }
}
