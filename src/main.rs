// SPDX-License-Identifier: MPL-2.0
use authbar::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
authbar

USAGE:
  authbar [OPTIONS]

OPTIONS:
  --api <URL>              Authentication backend base URL
  --toast <JSON>           Show a notification payload at startup
  --data-dir <DIR>         Directory holding the session store
  --config-dir <DIR>       Directory holding settings.toml
  --diagnostics-out <FILE> Write the diagnostics report on exit
  -h, --help               Print help
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let data_dir = opt_value(&mut args, "--data-dir");
    let config_dir = opt_value(&mut args, "--config-dir");
    paths::init_cli_overrides(data_dir, config_dir);

    let flags = Flags {
        api_base_url: opt_value(&mut args, "--api"),
        initial_toast: opt_value(&mut args, "--toast"),
        diagnostics_out: opt_value(&mut args, "--diagnostics-out"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!("ignoring unexpected arguments: {remaining:?}");
    }

    app::run(flags)
}

fn opt_value(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    match args.opt_value_from_str(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("invalid value for {key}: {err}");
            None
        }
    }
}
