//! Basic usage of the ordseq containers

use ordseq::config::Config;
use ordseq::{IndexedSeq, LinkedSeq, OrderedSeq, SeqConfig, ThreeWayCompare};

#[derive(Debug)]
struct Job {
    name: &'static str,
    priority: i32,
}

impl ThreeWayCompare for Job {
    fn compare_to(&self, other: &Self) -> i32 {
        self.priority - other.priority
    }
}

fn main() -> ordseq::Result<()> {
    ordseq::init();

    println!("=== OrderedSeq ===");
    let mut seq = OrderedSeq::with_config(&SeqConfig::memory_preset())?;
    seq.append_all([42, 7, 19, 7, 100]);
    for (i, v) in seq.iter() {
        println!("  [{}] {}", i, v);
    }
    let (idx, found) = seq.search(&19);
    println!("  search(19) -> index {}, found {}", idx, found);
    println!("  try_element_at(10) -> {:?}", seq.try_element_at(10).err());

    println!("=== IndexedSeq ===");
    let mut jobs = IndexedSeq::new();
    jobs.append(Job { name: "deploy", priority: 3 });
    jobs.append(Job { name: "build", priority: 1 });
    jobs.append(Job { name: "test", priority: 2 });
    for (_, job) in jobs.iter() {
        println!("  {} (priority {})", job.name, job.priority);
    }

    println!("=== LinkedSeq ===");
    let mut list = LinkedSeq::new();
    for v in 1..=6 {
        list.push_back(v);
    }
    let mut each = list.each();
    while let Some(node) = each.next(&list) {
        if list.get(node).map_or(false, |v| v % 2 == 0) {
            list.remove(node);
        }
    }
    println!("  odd values: {:?}", list);

    let config = SeqConfig::from_env()?;
    println!("Effective config from environment: {:?}", config);
    Ok(())
}
