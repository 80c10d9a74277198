// SPDX-License-Identifier: MPL-2.0
use bizdesk::app::{self, paths, Flags};
use bizdesk::{config, logging};

const HELP: &str = "\
BizDesk

USAGE:
  bizdesk [OPTIONS]

OPTIONS:
  -h, --help               Print this help and exit
      --config-dir <PATH>  Read settings.toml from PATH
                           (overrides BIZDESK_CONFIG_DIR)
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let config_dir: Option<String> = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            std::process::exit(2);
        }
    };
    paths::init_cli_overrides(config_dir);

    let (config, config_warning) = config::load();
    logging::init_tracing(config.log_level());
    if let Some(warning) = &config_warning {
        tracing::warn!("{warning}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("bizdesk-timers")
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start timer runtime: {err}");
            std::process::exit(1);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting BizDesk");

    app::run(Flags {
        config,
        config_warning,
        runtime: runtime.handle().clone(),
    })
}
