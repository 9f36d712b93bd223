// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tether_cli - command line and process entry for the tether daemon.
//!
//! Every invocation first tries to own the bus name. The owner becomes the
//! primary instance: it starts the [`Service`], handles its own command
//! line in-process, and serves the bus when it has nothing else to do. Any
//! other invocation forwards its command line to the owner and exits.

mod bridge;
mod cli;
mod logging;

pub mod config;
pub mod env;
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::{
    handle_local_options, list_devices, notification_target, uris_from_args, Endpoint,
    LocalEndpoint, RemoteEndpoint, EXIT_FAILURE, EXIT_HANDLED, EXIT_START_DAEMON,
};
pub use cli::Cli;
pub use config::{resolve_paths, Config, DirOverrides};
pub use error::{Error, Result};

use tether_core::{Collaborators, Paths, Service};
use tether_ipc::{register, BusClient, BusOwner, CancelToken, Registration, BUS_NAME};

/// Release version printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run one invocation and return its exit code.
pub fn run(cli: Cli) -> Result<i32> {
    if cli.version {
        println!("tether {}", VERSION);
        return Ok(EXIT_HANDLED);
    }

    let paths = resolve_paths(&cli.dir_overrides())?;
    let config = Config::load(&paths.config_dir)?;

    let registration = register(&paths.bus()).map_err(|e| Error::BusRegistration {
        name: BUS_NAME,
        reason: e.to_string(),
    })?;
    match registration {
        Registration::Primary(owner) => run_primary(&cli, paths, &config, owner),
        Registration::Secondary(client) => run_secondary(&cli, &config, client),
    }
}

fn run_primary(cli: &Cli, paths: Paths, config: &Config, owner: BusOwner) -> Result<i32> {
    logging::init_daemon(&paths.log_path());
    tracing::info!(version = VERSION, "tether starting as primary");

    let service = Service::startup(paths, Collaborators::headless())
        .map_err(|e| Error::Daemon(format!("failed to start: {}", e)))?;

    let result = handle(cli, &LocalEndpoint::new(&service), config).and_then(|code| {
        if code != EXIT_START_DAEMON {
            return Ok(code);
        }
        let uris = uris_from_args(&cli.uris)?;
        if !uris.is_empty() {
            service.open(&uris);
        }
        service.serve(&owner);
        Ok(EXIT_HANDLED)
    });

    service.shutdown();
    drop(owner);
    result
}

fn run_secondary(cli: &Cli, config: &Config, client: BusClient) -> Result<i32> {
    logging::init_client();
    let client = client.with_options(config.call_options(cancel_on_interrupt()));

    let code = handle(cli, &RemoteEndpoint::new(client.clone()), config)?;
    if code != EXIT_START_DAEMON {
        return Ok(code);
    }

    let remote_version = client.hello(VERSION)?;
    if remote_version != VERSION {
        tracing::warn!(
            local = VERSION,
            remote = %remote_version,
            "primary instance runs a different version"
        );
    }

    let uris = uris_from_args(&cli.uris)?;
    if uris.is_empty() {
        client.activate()?;
    } else {
        client.open(uris)?;
    }
    Ok(EXIT_HANDLED)
}

/// Abandon in-flight calls to the primary on SIGINT or SIGTERM.
fn cancel_on_interrupt() -> CancelToken {
    let token = CancelToken::new();
    let handler_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::warn!(error = %e, "failed to install interrupt handler");
    }
    token
}

fn handle(cli: &Cli, endpoint: &dyn Endpoint, config: &Config) -> Result<i32> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handle_local_options(cli, endpoint, config, &mut out).inspect_err(|e| {
        tracing::error!(error = %e, "failed to handle command line options");
    })
}
