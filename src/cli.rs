/*
 * Copyright 2022 Google LLC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

mod generate_config_schema;
mod listener;
mod names;

use std::path::{Path, PathBuf};

use crate::Config;

pub use self::{
    generate_config_schema::GenerateConfigSchema,
    listener::Listener,
    names::{clusters, Format, NamedCluster, Names},
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const ETC_CONFIG_PATH: &str = "/etc/ingress-xds/ingress-xds.yaml";

/// Generates Envoy configuration for the services of an ingress controller.
#[derive(clap::Parser)]
#[command(version, about)]
#[non_exhaustive]
pub struct Cli {
    /// The path to the configuration file listing the services.
    #[clap(short, long, env = "INGRESS_XDS_CONFIG", default_value = "ingress-xds.yaml")]
    pub config: PathBuf,
    /// Whether to suppress log output on stderr.
    #[clap(short, long, env)]
    pub quiet: bool,
    #[clap(subcommand)]
    pub command: Commands,
}

/// The various commands.
#[derive(Clone, clap::Subcommand)]
pub enum Commands {
    Names(Names),
    Listener(Listener),
    GenerateConfigSchema(GenerateConfigSchema),
}

impl Cli {
    /// Runs the selected command, writing its output to stdout.
    #[tracing::instrument(skip_all)]
    pub fn drive(self) -> crate::Result<()> {
        let version: std::borrow::Cow<'static, str> = if cfg!(debug_assertions) {
            format!("{VERSION}+debug").into()
        } else {
            VERSION.into()
        };

        if !self.quiet {
            let env_filter = tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy();
            tracing_subscriber::fmt()
                .json()
                .with_file(true)
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter)
                .init();
        }

        tracing::info!(version = &*version, "Starting ingress-xds");

        let stdout = std::io::stdout();
        let mut output = stdout.lock();
        match &self.command {
            Commands::Names(names) => names.run(&Self::read_config(&self.config)?, &mut output),
            Commands::Listener(listener) => {
                listener.run(&Self::read_config(&self.config)?, &mut output)
            }
            Commands::GenerateConfigSchema(generator) => generator.generate_config_schema(),
        }
    }

    /// Reads the configuration from `path`, then from the `/etc` path,
    /// falling back to an empty configuration when neither exists.
    fn read_config<A: AsRef<Path>>(path: A) -> Result<Config, eyre::Error> {
        let path = path.as_ref();
        let from_reader = |file| Config::from_reader(file).map_err(From::from);

        match std::fs::File::open(path) {
            Ok(file) => (from_reader)(file),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path=%path.display(), "provided path not found");
                match cfg!(unix).then(|| std::fs::File::open(ETC_CONFIG_PATH)) {
                    Some(Ok(file)) => (from_reader)(file),
                    Some(Err(error)) if error.kind() == std::io::ErrorKind::NotFound => {
                        tracing::debug!(path = ETC_CONFIG_PATH, "/etc path not found");
                        Ok(Config::default())
                    }
                    Some(Err(error)) => Err(error.into()),
                    None => Ok(Config::default()),
                }
            }
            Err(error) => Err(error.into()),
        }
    }
}
