// Copyright 2026 cstore Project Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `cstore-cli` publishes files into a content store and measures store hit ratios.

mod bench;
mod error;
mod produce;

use bench::BenchArgs;
use clap::{Parser, Subcommand, ValueEnum};
use cstore::{BackendConfig, HashConfig, OrderedConfig, Suite};
use produce::ProduceArgs;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Publish a file as named chunks and dump the store.
    Produce(ProduceArgs),
    /// Run a synthetic Interest workload and report the hit ratio.
    Bench(BenchArgs),
}

/// Store backend selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    Hash,
    Ordered,
}

impl From<BackendArg> for BackendConfig {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Hash => HashConfig::default().into(),
            BackendArg::Ordered => OrderedConfig::default().into(),
        }
    }
}

/// Packet suite selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SuiteArg {
    Ccnx,
    Ndn,
}

impl From<SuiteArg> for Suite {
    fn from(value: SuiteArg) -> Self {
        match value {
            SuiteArg::Ccnx => Suite::Ccnx,
            SuiteArg::Ndn => Suite::Ndn,
        }
    }
}

fn init_logger() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_line_number(true))
        .with(EnvFilter::from_default_env())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Command::Produce(args) => produce::run(args)?,
        Command::Bench(args) => bench::run(args)?,
    }

    Ok(())
}
