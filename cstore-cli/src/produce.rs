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

use std::{path::PathBuf, sync::Arc, time::Duration};

use bytes::Bytes;
use clap::Args;
use cstore::{Content, ContentStoreBuilder, Name, Packet, Status, Suite, DEFAULT_CAPACITY};

use crate::{
    error::{Error, Result},
    BackendArg, SuiteArg,
};

/// Largest chunk a single content object carries.
pub const MAX_CHUNK_SIZE: usize = 4048;

#[derive(Debug, Args)]
pub struct ProduceArgs {
    /// File to publish.
    file: PathBuf,

    /// Name prefix of the chunks, e.g. `/ndn/file`. Chunk `N` is named `<prefix>/cN`.
    #[arg(short, long)]
    prefix: Name,

    /// Payload bytes per chunk.
    #[arg(short, long, default_value_t = MAX_CHUNK_SIZE)]
    chunk_size: usize,

    /// Packet suite of the chunks.
    #[arg(long, value_enum, default_value_t = SuiteArg::Ndn)]
    suite: SuiteArg,

    /// Freshness period of every chunk, in milliseconds.
    #[arg(long)]
    freshness_ms: Option<u64>,

    /// Mark the chunks static so that they are never evicted.
    #[arg(long, default_value_t = false)]
    pin: bool,

    /// Store capacity.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Store backend.
    #[arg(long, value_enum, default_value_t = BackendArg::Hash)]
    backend: BackendArg,

    /// Also write every chunk packet to `<DIR>/cN.<ccntlv|ndntlv>`.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Split `data` into chunks named `<prefix>/c0`, `<prefix>/c1`, ...
///
/// The packet of each chunk is the chunk itself, so payloads share the file buffer.
pub fn chunk(prefix: &Name, data: Bytes, chunk_size: usize, suite: Suite) -> Result<Vec<(Name, Content)>> {
    if !(1..=MAX_CHUNK_SIZE).contains(&chunk_size) {
        return Err(Error::ChunkSize {
            size: chunk_size,
            max: MAX_CHUNK_SIZE,
        });
    }

    let chunks = (0..data.len())
        .step_by(chunk_size)
        .enumerate()
        .map(|(index, offset)| {
            let bytes = data.slice(offset..data.len().min(offset + chunk_size));
            let name = prefix.clone().with_component(format!("c{index}"));
            let content = Content::new(bytes.clone(), Arc::new(Packet::new(suite, bytes)));
            (name, content)
        })
        .collect();
    Ok(chunks)
}

/// File extension of a packet written in `suite`.
pub fn file_extension(suite: Suite) -> &'static str {
    match suite {
        Suite::Ccnx => "ccntlv",
        Suite::Ndn => "ndntlv",
    }
}

pub fn run(args: ProduceArgs) -> Result<()> {
    let data = std::fs::read(&args.file).map_err(|e| Error::io(&args.file, e))?;
    let chunks = chunk(&args.prefix, Bytes::from(data), args.chunk_size, args.suite.into())?;
    tracing::info!(
        "[produce]: {} split into {} chunks under {}",
        args.file.display(),
        chunks.len(),
        args.prefix
    );

    if let Some((last, _)) = chunks.last() {
        tracing::info!("[produce]: final chunk {}", last);
    }

    if let Some(dir) = args.output_dir.as_ref() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        let extension = file_extension(args.suite.into());
        for (index, (_, content)) in chunks.iter().enumerate() {
            let path = dir.join(format!("c{index}.{extension}"));
            std::fs::write(&path, content.packet().bytes()).map_err(|e| Error::io(&path, e))?;
        }
    }

    let mut store = ContentStoreBuilder::new()
        .with_capacity(args.capacity)
        .with_backend(args.backend)
        .build()?;
    let mut rejected = 0;
    for (name, content) in chunks {
        let content = match args.freshness_ms {
            Some(ms) => content.with_freshness(Duration::from_millis(ms)),
            None => content,
        };
        if store.add(&name, content.with_static(args.pin))? == Status::Unsuccessful {
            rejected += 1;
        }
    }
    if rejected > 0 {
        tracing::warn!("[produce]: {} chunks did not fit into the store", rejected);
    }

    let mut dump = String::new();
    store.print_to(&mut dump)?;
    print!("{dump}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix() -> Name {
        "/ndn/file".parse().unwrap()
    }

    #[test]
    fn test_chunk_names_and_sizes() {
        let data = Bytes::from(vec![7u8; 10]);
        let chunks = chunk(&prefix(), data, 4, Suite::Ndn).unwrap();

        let names = chunks.iter().map(|(name, _)| name.to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["/ndn/file/c0", "/ndn/file/c1", "/ndn/file/c2"]);
        let sizes = chunks
            .iter()
            .map(|(_, content)| content.payload().len())
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![4, 4, 2]);
        assert!(chunks.iter().all(|(_, content)| content.is_valid()));
    }

    #[test]
    fn test_chunk_size_bounds() {
        let data = Bytes::from_static(b"hello");
        assert!(matches!(
            chunk(&prefix(), data.clone(), 0, Suite::Ccnx),
            Err(Error::ChunkSize { size: 0, .. })
        ));
        assert!(matches!(
            chunk(&prefix(), data.clone(), MAX_CHUNK_SIZE + 1, Suite::Ccnx),
            Err(Error::ChunkSize { .. })
        ));
        assert_eq!(chunk(&prefix(), data, MAX_CHUNK_SIZE, Suite::Ccnx).unwrap().len(), 1);
        assert!(chunk(&prefix(), Bytes::new(), 8, Suite::Ccnx).unwrap().is_empty());
    }

    #[test_log::test]
    fn test_run_writes_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("input");
        std::fs::write(&file, vec![1u8; 9000]).unwrap();
        let out = dir.path().join("out");

        run(ProduceArgs {
            file,
            prefix: prefix(),
            chunk_size: MAX_CHUNK_SIZE,
            suite: SuiteArg::Ndn,
            freshness_ms: Some(1000),
            pin: false,
            capacity: 2,
            backend: BackendArg::Ordered,
            output_dir: Some(out.clone()),
        })
        .unwrap();

        let lens = (0..3)
            .map(|i| std::fs::read(out.join(format!("c{i}.ndntlv"))).unwrap().len())
            .collect::<Vec<_>>();
        assert_eq!(lens, vec![4048, 4048, 904]);
        assert!(!out.join("c3.ndntlv").exists());
        assert!(!out.join("c0").exists());
    }

    #[test]
    fn test_ccnx_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("input");
        std::fs::write(&file, b"hello world").unwrap();
        let out = dir.path().join("out");

        run(ProduceArgs {
            file,
            prefix: prefix(),
            chunk_size: 6,
            suite: SuiteArg::Ccnx,
            freshness_ms: None,
            pin: true,
            capacity: 4,
            backend: BackendArg::Hash,
            output_dir: Some(out.clone()),
        })
        .unwrap();

        assert_eq!(std::fs::read(out.join("c0.ccntlv")).unwrap(), b"hello ");
        assert_eq!(std::fs::read(out.join("c1.ccntlv")).unwrap(), b"world");
        assert_eq!(file_extension(Suite::Ndn), "ndntlv");
    }

    #[test]
    fn test_run_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = run(ProduceArgs {
            file: dir.path().join("missing"),
            prefix: prefix(),
            chunk_size: 16,
            suite: SuiteArg::Ccnx,
            freshness_ms: None,
            pin: true,
            capacity: 4,
            backend: BackendArg::Hash,
            output_dir: None,
        });
        assert!(matches!(res, Err(Error::Io { .. })));
    }
}
