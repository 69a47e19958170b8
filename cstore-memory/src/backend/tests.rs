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

//! Behavior shared by every backend.

use std::{sync::Arc, time::Duration};

use cstore_common::{
    content::Suite, event::Event, matching::MatchMode, packet::Interest, scheduler::TimerHandle,
};
use itertools::Itertools;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{
    lru::{HashLru, OrderedLru},
    Backend, Hooks, Insert,
};
use crate::{
    config::{AgingConfig, HashConfig, OrderedConfig},
    record::Flags,
    test_utils::{content, name, RecordingListener, RecordingScheduler, TimerOp},
};

struct Harness {
    backend: Box<dyn Backend>,
    scheduler: Arc<RecordingScheduler>,
    listener: Arc<RecordingListener>,
}

fn harnesses() -> Vec<Harness> {
    let hash = |hooks| Box::new(HashLru::new(&HashConfig::default(), hooks)) as Box<dyn Backend>;
    let ordered = |hooks| Box::new(OrderedLru::new(&OrderedConfig::default(), hooks)) as Box<dyn Backend>;

    let builders: [fn(Hooks) -> Box<dyn Backend>; 2] = [hash, ordered];
    builders
        .into_iter()
        .map(|build| {
            let scheduler = Arc::new(RecordingScheduler::default());
            let listener = Arc::new(RecordingListener::default());
            let backend = build(Hooks {
                scheduler: scheduler.clone(),
                event_listener: Some(listener.clone()),
            });
            Harness {
                backend,
                scheduler,
                listener,
            }
        })
        .collect()
}

fn fill(backend: &mut dyn Backend, names: &[&str], capacity: usize) {
    for n in names {
        assert_ne!(backend.add(&name(n), content(n), capacity), Insert::Rejected);
    }
}

#[test_log::test]
fn test_evict_least_recently_used() {
    for Harness {
        mut backend, listener, ..
    } in harnesses()
    {
        fill(backend.as_mut(), &["/a", "/b", "/c"], 3);
        assert!(backend.lookup(&name("/a")).is_some());

        assert_eq!(backend.add(&name("/d"), content("d"), 3), Insert::Inserted);
        assert_eq!(backend.len(), 3);
        assert!(backend.lookup(&name("/b")).is_none());
        assert_eq!(listener.names(Event::Evict), vec![name("/b")]);

        assert!(backend.remove_oldest_entry());
        assert_eq!(listener.names(Event::Evict), vec![name("/b"), name("/c")]);
        assert_eq!(backend.len(), 2);
    }
}

#[test_log::test]
fn test_replace_keeps_single_entry() {
    for Harness {
        mut backend, listener, ..
    } in harnesses()
    {
        fill(backend.as_mut(), &["/a", "/b"], 2);
        assert_eq!(backend.add(&name("/a"), content("new"), 2), Insert::Replaced);
        assert_eq!(backend.len(), 2);
        assert_eq!(backend.lookup(&name("/a")).unwrap().content(), &content("new"));
        assert_eq!(listener.names(Event::Replace), vec![name("/a")]);
        assert!(listener.names(Event::Evict).is_empty());

        // the replacement is the most recently used entry
        assert!(backend.remove_oldest_entry());
        assert_eq!(listener.names(Event::Evict), vec![name("/b")]);
    }
}

#[test_log::test]
fn test_static_content_is_never_evicted() {
    for Harness {
        mut backend, listener, ..
    } in harnesses()
    {
        backend.add(&name("/s"), content("s").with_static(true), 2);
        backend.add(&name("/a"), content("a"), 2);
        backend.add(&name("/b"), content("b"), 2);
        assert_eq!(listener.names(Event::Evict), vec![name("/a")]);

        assert!(backend.remove_oldest_entry());
        assert!(!backend.remove_oldest_entry());
        assert_eq!(backend.len(), 1);

        assert_eq!(backend.add(&name("/c"), content("c"), 1), Insert::Rejected);
        assert!(backend.lookup(&name("/c")).is_none());
        assert!(backend.lookup(&name("/s")).is_some());
    }
}

#[test_log::test]
fn test_zero_capacity_rejects() {
    for Harness { mut backend, .. } in harnesses() {
        assert_eq!(backend.add(&name("/a"), content("a"), 0), Insert::Rejected);
        assert!(backend.is_empty());
    }
}

#[test_log::test]
fn test_timers_follow_entries() {
    for Harness {
        mut backend,
        scheduler,
        ..
    } in harnesses()
    {
        let fresh = |payload| content(payload).with_freshness(Duration::from_secs(4));

        backend.add(&name("/a"), fresh("a"), 8);
        backend.add(&name("/b"), fresh("b"), 8);
        backend.add(&name("/c"), content("c"), 8);
        assert_eq!(scheduler.armed().len(), 2);
        assert_eq!(
            scheduler.ops()[0],
            TimerOp::Arm(name("/a"), Duration::from_secs(4), TimerHandle::new(0))
        );

        // replacing disarms the old timer and arms a new one
        backend.add(&name("/a"), fresh("a2"), 8);
        assert_eq!(scheduler.armed().len(), 2);

        assert!(backend.remove(&name("/b")));
        assert_eq!(scheduler.armed().len(), 1);

        backend.clear();
        assert!(scheduler.armed().is_empty());
        assert!(backend.is_empty());
    }
}

#[test_log::test]
fn test_remove_and_clear() {
    for Harness {
        mut backend, listener, ..
    } in harnesses()
    {
        fill(backend.as_mut(), &["/a", "/b", "/c"], 8);
        assert!(!backend.remove(&name("/x")));
        assert!(backend.remove(&name("/b")));
        assert!(!backend.remove(&name("/b")));
        assert_eq!(listener.names(Event::Remove), vec![name("/b")]);

        backend.clear();
        assert!(backend.is_empty());
        assert!(!backend.remove_oldest_entry());
        assert_eq!(
            listener.names(Event::Clear).into_iter().sorted().collect_vec(),
            vec![name("/a"), name("/c")]
        );

        // clearing an empty store is a no-op
        backend.clear();
        assert_eq!(listener.events().len(), 3);
    }
}

#[test_log::test]
fn test_exists_modes() {
    for Harness { mut backend, .. } in harnesses() {
        fill(backend.as_mut(), &["/a/b", "/a/b/c", "/x/y/z"], 8);

        assert!(backend.exists(&name("/a/b"), MatchMode::Exact));
        assert!(!backend.exists(&name("/a"), MatchMode::Exact));

        assert!(backend.exists(&name("/a"), MatchMode::Prefix));
        assert!(backend.exists(&name("/a/b/c"), MatchMode::Prefix));
        assert!(!backend.exists(&name("/a/b/c/d"), MatchMode::Prefix));
        assert!(!backend.exists(&name("/a/bb"), MatchMode::Prefix));

        assert!(backend.exists(&name("/a/b/c/d"), MatchMode::Longest));
        assert!(backend.exists(&name("/x"), MatchMode::Longest));
        assert!(!backend.exists(&name("/x/q"), MatchMode::Longest));
        assert!(!backend.exists(&name("/q"), MatchMode::Longest));
    }
}

#[test_log::test]
fn test_exists_refreshes_match() {
    for Harness {
        mut backend, listener, ..
    } in harnesses()
    {
        fill(backend.as_mut(), &["/a/b", "/c"], 2);
        assert!(backend.exists(&name("/a"), MatchMode::Prefix));
        backend.add(&name("/d"), content("d"), 2);
        assert_eq!(listener.names(Event::Evict), vec![name("/c")]);
    }
}

#[test_log::test]
fn test_longest_prefers_more_components() {
    for Harness { mut backend, .. } in harnesses() {
        fill(backend.as_mut(), &["/a/b/c", "/a", "/a/b"], 8);

        let interest = Interest::new(Suite::Ndn, name("/a/b/c/d")).with_can_be_prefix(true);
        // only names extending the Interest name satisfy it
        assert!(backend.match_interest(&interest).is_none());

        assert!(backend.exists(&name("/a/b/c/d"), MatchMode::Longest));
        // the deepest match was refreshed, so it is not the eviction victim
        assert!(backend.remove_oldest_entry());
        assert!(backend.lookup(&name("/a/b/c")).is_some());
        assert!(backend.lookup(&name("/a")).is_none());
    }
}

#[test_log::test]
fn test_match_interest_per_suite() {
    for Harness { mut backend, .. } in harnesses() {
        fill(backend.as_mut(), &["/a/b/1", "/a/b/2", "/a/b"], 8);
        backend.lookup(&name("/a/b/1"));

        let exact = Interest::new(Suite::Ccnx, name("/a/b")).with_can_be_prefix(true);
        assert_eq!(backend.match_interest(&exact).unwrap().name(), &name("/a/b"));

        let exact = Interest::new(Suite::Ndn, name("/a"));
        assert!(backend.match_interest(&exact).is_none());

        // equally specific prefix matches go to the most recently used entry
        backend.lookup(&name("/a/b/2"));
        let prefix = Interest::new(Suite::Ndn, name("/a")).with_can_be_prefix(true);
        let entry = backend.match_interest(&prefix).unwrap();
        assert_eq!(entry.name(), &name("/a/b/2"));
        assert_eq!(entry.served(), 1);
        assert_eq!(backend.match_interest(&prefix).unwrap().served(), 2);
    }
}

#[test_log::test]
fn test_aging_marks_stale_then_expires() {
    let aging = AgingConfig {
        stale_after: 2,
        expire_after: Some(4),
    };
    for Harness {
        mut backend, listener, ..
    } in harnesses()
    {
        backend.add(&name("/a"), content("a"), 8);
        backend.add(&name("/b"), content("b"), 8);
        backend.add(&name("/s"), content("s").with_static(true), 8);

        assert_eq!(backend.age(&aging), 0);
        assert_eq!(backend.age(&aging), 0);

        let fresh = Interest::new(Suite::Ndn, name("/a")).with_must_be_fresh(true);
        let any = Interest::new(Suite::Ndn, name("/a"));
        assert!(backend.match_interest(&fresh).is_none());
        assert!(backend.match_interest(&any).is_some());
        // the hit refreshed the entry
        assert!(backend.match_interest(&fresh).is_some());

        assert_eq!(backend.age(&aging), 0);
        assert_eq!(backend.age(&aging), 1);
        assert_eq!(listener.names(Event::Expire), vec![name("/b")]);

        for _ in 0..16 {
            backend.age(&aging);
        }
        assert_eq!(listener.names(Event::Expire), vec![name("/b"), name("/a")]);
        let entry = backend.lookup(&name("/s")).unwrap();
        assert_eq!(entry.flags(), Flags::STATIC);
        assert_eq!(backend.len(), 1);
    }
}

#[test_log::test]
fn test_aging_without_expiry_keeps_entries() {
    let aging = AgingConfig::default();
    for Harness { mut backend, .. } in harnesses() {
        fill(backend.as_mut(), &["/a", "/b"], 8);
        for _ in 0..64 {
            assert_eq!(backend.age(&aging), 0);
        }
        assert_eq!(backend.len(), 2);
        assert!(backend.lookup(&name("/a")).is_some());

        backend.clear();
        assert_eq!(backend.age(&aging), 0);
    }
}

#[test]
fn test_print_sorted_by_name() {
    for Harness { mut backend, .. } in harnesses() {
        fill(backend.as_mut(), &["/c", "/a", "/b/x"], 8);
        let mut dump = String::new();
        backend.print(&mut dump).unwrap();
        let lines = dump.lines().collect_vec();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("3 entries"));
        assert!(lines[1].trim_start().starts_with("/a "));
        assert!(lines[2].trim_start().starts_with("/b/x "));
        assert!(lines[3].trim_start().starts_with("/c "));
    }
}

/// Both backends must answer a random workload identically.
#[test_log::test]
fn test_backends_agree() {
    const CAPACITY: usize = 16;

    let mut rng = SmallRng::seed_from_u64(114514);
    let mut backends = harnesses();
    let aging = AgingConfig {
        stale_after: 3,
        expire_after: Some(6),
    };

    for _ in 0..4096 {
        let n = name(&format!("/r/{}/{}", rng.random_range(0..4), rng.random_range(0..16)));
        let query = n.prefix(rng.random_range(1..=n.len()));
        let op = rng.random_range(0..100);
        let static_content = rng.random_range(0..50) == 0;

        let outcomes = backends
            .iter_mut()
            .map(|Harness { backend, .. }| match op {
                0..40 => format!(
                    "{:?}",
                    backend.add(&n, content("v").with_static(static_content), CAPACITY)
                ),
                40..60 => format!("{:?}", backend.lookup(&n).map(|entry| entry.name().clone())),
                60..70 => format!("{}", backend.remove(&n)),
                70..80 => format!("{}", backend.exists(&query, MatchMode::Longest)),
                80..90 => {
                    let interest = Interest::new(Suite::Ndn, query.clone())
                        .with_can_be_prefix(true)
                        .with_must_be_fresh(op % 2 == 0);
                    format!("{:?}", backend.match_interest(&interest).map(|entry| entry.name().clone()))
                }
                90..95 => format!("{}", backend.age(&aging)),
                _ => format!("{}", backend.remove_oldest_entry()),
            })
            .collect_vec();

        assert!(outcomes.iter().all_equal(), "op {op} on {n}: {outcomes:?}");
        for Harness { backend, .. } in backends.iter() {
            assert!(backend.len() <= CAPACITY);
        }
    }

    let dumps = backends
        .iter()
        .map(|Harness { backend, .. }| {
            let mut dump = String::new();
            backend.print(&mut dump).unwrap();
            dump.lines().skip(1).map(str::to_string).collect_vec()
        })
        .collect_vec();
    assert!(dumps.iter().all_equal());
}

#[test_log::test]
fn test_rejected_add_evicts_nothing() {
    for Harness {
        mut backend, listener, ..
    } in harnesses()
    {
        backend.add(&name("/s1"), content("s1").with_static(true), 2);
        backend.add(&name("/s2"), content("s2").with_static(true), 2);
        assert_eq!(backend.add(&name("/s1"), content("s1"), 1), Insert::Replaced);

        // two victims are needed to fit under capacity 1, only `/s1` is evictable
        assert_eq!(backend.add(&name("/x"), content("x"), 1), Insert::Rejected);
        assert_eq!(backend.len(), 2);
        assert!(backend.peek(&name("/s1")).is_some());
        assert!(listener.names(Event::Evict).is_empty());

        // with enough victims an over-capacity store is brought back under capacity
        fill(backend.as_mut(), &["/a", "/b"], 8);
        assert_eq!(backend.add(&name("/y"), content("y"), 3), Insert::Inserted);
        assert_eq!(backend.len(), 3);
        assert_eq!(listener.names(Event::Evict), vec![name("/s1"), name("/a")]);
    }
}

#[test_log::test]
fn test_peek_leaves_entry_untouched() {
    for Harness { mut backend, .. } in harnesses() {
        fill(backend.as_mut(), &["/a", "/b"], 8);
        let before = backend.peek(&name("/a")).unwrap();
        assert_eq!(backend.peek(&name("/a")).unwrap(), before);
        assert!(backend.peek(&name("/a/b")).is_none());

        assert!(backend.remove_oldest_entry());
        assert!(backend.peek(&name("/a")).is_none());
    }
}

#[test_log::test]
fn test_repeated_aging_keeps_classification() {
    for stale_after in [1, 3] {
        let aging = AgingConfig {
            stale_after,
            expire_after: None,
        };
        for Harness { mut backend, .. } in harnesses() {
            fill(backend.as_mut(), &["/a", "/b"], 8);
            let stale = |backend: &dyn Backend, n: &str| {
                backend.peek(&name(n)).unwrap().flags().contains(Flags::STALE)
            };

            backend.age(&aging);
            let once = (stale(backend.as_ref(), "/a"), stale(backend.as_ref(), "/b"));
            backend.age(&aging);
            let twice = (stale(backend.as_ref(), "/a"), stale(backend.as_ref(), "/b"));

            let expected = stale_after == 1;
            assert_eq!(once, (expected, expected), "stale_after {stale_after}");
            assert_eq!(twice, once, "stale_after {stale_after}");

            // the classification only moves forward, and a use resets it
            for _ in 2..stale_after {
                backend.age(&aging);
            }
            assert!(stale(backend.as_ref(), "/a"));
            assert!(backend.lookup(&name("/a")).is_some());
            assert!(!stale(backend.as_ref(), "/a"));
            assert!(stale(backend.as_ref(), "/b"));
            assert_eq!(backend.len(), 2);
        }
    }
}
