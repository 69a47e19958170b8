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

use std::{sync::Arc, time::Instant};

use anyhow::anyhow;
use clap::Args;
use cstore::{AgingConfig, Content, ContentStoreBuilder, Interest, Name, Packet, Suite, DEFAULT_CAPACITY};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};

use crate::{error::Result, BackendArg, SuiteArg};

#[derive(Debug, Args)]
pub struct BenchArgs {
    /// Store capacity.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Store backend.
    #[arg(long, value_enum, default_value_t = BackendArg::Hash)]
    backend: BackendArg,

    /// Packet suite of the Interests.
    #[arg(long, value_enum, default_value_t = SuiteArg::Ndn)]
    suite: SuiteArg,

    /// Distinct content names.
    #[arg(long, default_value_t = 1000)]
    names: usize,

    /// Zipf exponent of the name popularity.
    #[arg(long, default_value_t = 0.9)]
    zipf_s: f64,

    /// Interests to send.
    #[arg(long, default_value_t = 100_000)]
    interests: usize,

    /// Interests between two aging ticks. 0 disables aging.
    #[arg(long, default_value_t = 1000)]
    age_interval: usize,

    /// Idle aging ticks after which an entry is stale.
    #[arg(long, default_value_t = 8)]
    stale_after: u32,

    /// Idle aging ticks after which an entry expires.
    #[arg(long)]
    expire_after: Option<u32>,

    /// Send Interests with `MustBeFresh`.
    #[arg(long, default_value_t = false)]
    must_be_fresh: bool,

    /// Random seed. A random one is used if not set.
    #[arg(long)]
    seed: Option<u64>,
}

/// Counters of a finished workload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub hits: usize,
    pub misses: usize,
    pub rejected: usize,
    pub size: usize,
}

impl Report {
    pub fn hit_ratio(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

fn content(index: u64) -> Content {
    let bytes = index.to_be_bytes().to_vec();
    Content::new(bytes.clone(), Arc::new(Packet::new(Suite::Ndn, bytes)))
}

/// Send Zipf distributed Interests, publishing content on every miss.
pub fn workload(args: &BenchArgs) -> Result<Report> {
    let mut store = ContentStoreBuilder::new()
        .with_capacity(args.capacity)
        .with_backend(args.backend)
        .with_aging(AgingConfig {
            stale_after: args.stale_after,
            expire_after: args.expire_after,
        })
        .build()?;

    let zipf = Zipf::new(args.names as f64, args.zipf_s).map_err(|e| anyhow!("invalid zipf distribution: {e}"))?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    tracing::debug!("[bench]: seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let prefix: Name = Name::new().with_component("bench");
    let mut report = Report::default();
    for i in 0..args.interests {
        if args.age_interval > 0 && i > 0 && i % args.age_interval == 0 {
            store.age()?;
        }

        let index = zipf.sample(&mut rng) as u64;
        let name = prefix.clone().with_component(index.to_string());
        let interest = Interest::new(args.suite.into(), name.clone()).with_must_be_fresh(args.must_be_fresh);
        if store.match_interest(&interest)?.is_some() {
            report.hits += 1;
            continue;
        }
        report.misses += 1;
        if !store.add(&name, content(index))?.is_successful() {
            report.rejected += 1;
        }
    }
    report.size = store.current_size();
    Ok(report)
}

pub fn run(args: BenchArgs) -> Result<()> {
    let start = Instant::now();
    let report = workload(&args)?;
    let elapsed = start.elapsed();

    println!("backend:   {:?}", args.backend);
    println!("capacity:  {}", args.capacity);
    println!("interests: {}", args.interests);
    println!("hits:      {}", report.hits);
    println!("misses:    {}", report.misses);
    println!("rejected:  {}", report.rejected);
    println!("size:      {}", report.size);
    println!("hit ratio: {:.2}%", report.hit_ratio() * 100.0);
    println!("elapsed:   {elapsed:?}");
    Ok(())
}
