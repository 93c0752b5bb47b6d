//! Monotone click tally with sharded atomic storage.
//!
//! [`Tally`] only ever grows. Each thread increments its own cache-padded
//! slot, so parallel event dispatch never loses an increment and never
//! fights over a single cache line.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;
use std::fmt::Debug;

use crate::counters::{GetComponentCounter, NUM_COMPONENTS, THREAD_SLOT_INDEX};

/// A monotonically increasing counter using sharded atomic storage.
///
/// # Examples
///
/// ```rust
/// use clickmeter::counters::tally::Tally;
/// use std::sync::Arc;
/// use std::thread;
///
/// let tally = Arc::new(Tally::new());
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let t = Arc::clone(&tally);
///         thread::spawn(move || {
///             for _ in 0..1000 {
///                 t.add(1);
///             }
///         })
///     })
///     .collect();
///
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(tally.value(), 4000);
/// ```
pub struct Tally {
    components: [CachePadded<AtomicUsize>; NUM_COMPONENTS],
}

impl GetComponentCounter for Tally {
    type CounterType = AtomicUsize;

    #[inline]
    fn get_component_counter(&self) -> &AtomicUsize {
        THREAD_SLOT_INDEX.with(|idx| &self.components[*idx])
    }
}

impl Tally {
    /// Creates a tally with every shard at zero.
    pub const fn new() -> Self {
        const ZERO: CachePadded<AtomicUsize> = CachePadded::new(AtomicUsize::new(0));
        Tally {
            components: [ZERO; NUM_COMPONENTS],
        }
    }

    /// Adds `value` to the current thread's shard.
    #[inline]
    pub fn add(&self, value: usize) {
        self.get_component_counter()
            .fetch_add(value, Ordering::Relaxed);
    }

    /// Returns the current thread's contribution.
    #[inline]
    pub fn local_value(&self) -> usize {
        self.get_component_counter().load(Ordering::Relaxed)
    }

    /// Sums all shards.
    #[inline]
    pub fn value(&self) -> u64 {
        self.components
            .iter()
            .map(|counter| counter.load(Ordering::Relaxed) as u64)
            .sum()
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Tally {
    /// Output format: `Tally{ [slot]:value ... }`, non-zero shards only.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tally{{")?;
        for (i, counter) in self.components.iter().enumerate() {
            let val = counter.load(Ordering::Relaxed);
            if val != 0 {
                write!(f, " [{i}]:{val}")?;
            }
        }
        write!(f, " }}")
    }
}
