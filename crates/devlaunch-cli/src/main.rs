mod plan;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use devlaunch_classpath::ClasspathEntryResolver;
use devlaunch_core::{
    load_artifacts, BootstrapPlan, ClassLoaderConfig, LaunchConfig, LoaderPlan,
    RuntimeLoaderConfigurator,
};
use devlaunch_tempfs::{CleanupGuard, TempResourceRegistry};
use plan::LaunchPlan;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("devlaunch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Launch-time runtime configuration for an embedded web server")
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("plan")
                .about("Configure one launch and print what the server would receive")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .default_value("devlaunch.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Launch configuration (TOML)"),
                )
                .arg(
                    Arg::new("artifacts")
                        .long("artifacts")
                        .short('a')
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Resolved artifact manifest (JSON)"),
                )
                .arg(
                    Arg::new("temp-dir")
                        .long("temp-dir")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Create temporary files here instead of the system temp directory"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the plan as JSON"),
                )
                .arg(
                    Arg::new("wait")
                        .long("wait")
                        .action(ArgAction::SetTrue)
                        .help("Keep temporary files until interrupted"),
                ),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("plan", args)) => run_plan(args),
        _ => Ok(()),
    }
}

fn run_plan(args: &ArgMatches) -> anyhow::Result<()> {
    let config_path = args
        .get_one::<PathBuf>("config")
        .context("missing --config")?;
    let artifacts_path = args
        .get_one::<PathBuf>("artifacts")
        .context("missing --artifacts")?;

    let config = LaunchConfig::load(config_path)?;
    let artifacts = load_artifacts(artifacts_path)?;

    let registry = TempResourceRegistry::new();
    let guard = CleanupGuard::new(registry.clone());
    #[cfg(unix)]
    let signals = devlaunch_tempfs::install_signal_cleanup(registry.clone())
        .context("failed to install signal handlers")?;

    let mut configurator = RuntimeLoaderConfigurator::new(registry);
    if let Some(dir) = args.get_one::<PathBuf>("temp-dir") {
        configurator = configurator
            .with_resolver(ClasspathEntryResolver::new().with_temp_root(dir))
            .with_descriptor_dir(dir);
    }

    let mut loader = LoaderPlan::new();
    let mut bootstrap = BootstrapPlan::new();
    let runtime = configurator.configure(
        ClassLoaderConfig::new(&mut loader, config.loader_settings()),
        &config.resolution_request(artifacts),
        &config.additional_classpath_dirs,
        &config.descriptor_inputs(),
        &mut bootstrap,
    )?;

    let plan = LaunchPlan::new(loader, &bootstrap, &runtime);
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{plan}");
    }

    if args.get_flag("wait") {
        tracing::info!("holding temporary files, interrupt to clean up");
        loop {
            std::thread::park();
        }
    }

    drop(runtime);
    #[cfg(unix)]
    signals.close();
    let report = guard.finish();
    tracing::debug!(removed = report.removed.len(), "launch finished");
    Ok(())
}
