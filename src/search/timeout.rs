//! The timeout watcher: one auxiliary thread per search that flips a shared
//! atomic flag once the budget elapses, then exits. The only state crossing
//! the thread boundary is that flag; the search polls it at every node and
//! unwinds cooperatively.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Polling granularity; coarse enough to avoid busy-spinning.
const TICK: Duration = Duration::from_millis(5);

/// Spawn the watcher. The flag is set with release ordering after `time_ms`
/// elapses on a monotonic clock. An externally set flag (a `stop` command)
/// ends the watcher early.
pub fn spawn_watcher(flag: Arc<AtomicBool>, time_ms: u64) -> JoinHandle<()> {
    thread::spawn(move || {
        let start = Instant::now();
        let budget = Duration::from_millis(time_ms);
        while !flag.load(Ordering::Relaxed) {
            if start.elapsed() >= budget {
                flag.store(true, Ordering::Release);
                break;
            }
            thread::sleep(TICK);
        }
    })
}
