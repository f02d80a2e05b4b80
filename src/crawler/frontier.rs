//! Frontier queue, visited set, and page budget
//!
//! All shared mutable crawl state lives here, behind one mutex, so each
//! contract operation is a single atomic step:
//!
//! - `try_admit` collapses "is this URL new" and "enqueue it" into one
//!   check-and-insert, so two workers racing on the same discovered URL
//!   can never both admit it.
//! - `begin_fetch` collapses "is there budget", "is there work", and "could
//!   work still appear" into one verdict, so no worker can observe a
//!   drained frontier while another is mid-fetch and about to repopulate it.
//!
//! The lock is never held across an await; every operation is a short
//! critical section.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use url::Url;

/// Verdict returned by [`Frontier::begin_fetch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dequeue {
    /// A URL reserved for fetching; the budget slot is consumed and the
    /// caller is counted in-flight until it calls `finish_fetch`
    Url(Url),

    /// Nothing to hand out right now, but outstanding fetches may still
    /// admit new URLs; the caller should retry shortly
    Pending,

    /// The crawl is over: no queued work, no in-flight fetches (or the
    /// budget is exhausted and all fetches have completed)
    Drained,
}

struct FrontierInner {
    /// FIFO queue of URLs awaiting fetch
    queue: VecDeque<Url>,

    /// Every URL ever admitted, keyed by canonical string form.
    /// Membership means "enqueued or processed", not "fetched successfully";
    /// failed fetches stay visited so they are never retried.
    visited: HashSet<String>,

    /// Fetch operations still permitted; decremented once per dequeue
    budget_remaining: u64,

    /// Workers currently between `begin_fetch` and `finish_fetch`
    in_flight: usize,
}

/// Shared crawl frontier with visited-set dedup and a page budget
pub struct Frontier {
    inner: Mutex<FrontierInner>,
}

impl Frontier {
    /// Creates an empty frontier with `max_pages` of fetch budget
    pub fn new(max_pages: u64) -> Self {
        Self {
            inner: Mutex::new(FrontierInner {
                queue: VecDeque::new(),
                visited: HashSet::new(),
                budget_remaining: max_pages,
                in_flight: 0,
            }),
        }
    }

    /// Atomically admits a URL if it has never been seen
    ///
    /// Marks the URL visited and enqueues it in one step. Returns true for
    /// exactly one caller per distinct URL, across any interleaving of
    /// concurrent callers. Admission stays open after the budget hits zero;
    /// URLs admitted past that point simply remain queued at crawl end.
    pub fn try_admit(&self, url: &Url) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.visited.insert(url.as_str().to_string()) {
            inner.queue.push_back(url.clone());
            true
        } else {
            false
        }
    }

    /// Atomically reserves the next URL for fetching, or reports why not
    ///
    /// On `Dequeue::Url` the front of the queue is popped, one budget slot
    /// is consumed, and the caller is counted in-flight. The budget never
    /// goes below zero and never yields more than `max_pages` successful
    /// dequeues in total.
    pub fn begin_fetch(&self) -> Dequeue {
        let mut inner = self.inner.lock().unwrap();

        if inner.budget_remaining == 0 || inner.queue.is_empty() {
            // In-flight fetches may still repopulate the queue (or, with
            // the budget gone, must simply be allowed to complete).
            return if inner.in_flight == 0 {
                Dequeue::Drained
            } else {
                Dequeue::Pending
            };
        }

        // Non-empty was checked above under the same lock
        let url = match inner.queue.pop_front() {
            Some(u) => u,
            None => return Dequeue::Pending,
        };
        inner.budget_remaining -= 1;
        inner.in_flight += 1;
        Dequeue::Url(url)
    }

    /// Marks a fetch as complete, successful or not
    ///
    /// Must be called exactly once per `Dequeue::Url`.
    pub fn finish_fetch(&self) {
        let mut inner = self.inner.lock().unwrap();
        debug_assert!(inner.in_flight > 0);
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }

    /// Number of URLs currently queued
    pub fn queued_len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    /// Fetch budget still available
    pub fn budget_remaining(&self) -> u64 {
        self.inner.lock().unwrap().budget_remaining
    }

    /// Number of distinct URLs ever admitted
    pub fn visited_len(&self) -> usize {
        self.inner.lock().unwrap().visited.len()
    }

    /// Workers currently awaiting a fetch result
    pub fn in_flight(&self) -> usize {
        self.inner.lock().unwrap().in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_admit_new_url() {
        let frontier = Frontier::new(10);
        assert!(frontier.try_admit(&url("https://shop.test/")));
        assert_eq!(frontier.queued_len(), 1);
        assert_eq!(frontier.visited_len(), 1);
    }

    #[test]
    fn test_admit_duplicate_rejected() {
        let frontier = Frontier::new(10);
        assert!(frontier.try_admit(&url("https://shop.test/a")));
        assert!(!frontier.try_admit(&url("https://shop.test/a")));
        assert_eq!(frontier.queued_len(), 1);
    }

    #[test]
    fn test_dequeued_url_stays_visited() {
        let frontier = Frontier::new(10);
        frontier.try_admit(&url("https://shop.test/a"));
        assert!(matches!(frontier.begin_fetch(), Dequeue::Url(_)));
        // Still visited after leaving the queue
        assert!(!frontier.try_admit(&url("https://shop.test/a")));
    }

    #[test]
    fn test_fifo_order() {
        let frontier = Frontier::new(10);
        frontier.try_admit(&url("https://shop.test/a"));
        frontier.try_admit(&url("https://shop.test/b"));

        match frontier.begin_fetch() {
            Dequeue::Url(u) => assert_eq!(u.path(), "/a"),
            other => panic!("expected URL, got {:?}", other),
        }
        match frontier.begin_fetch() {
            Dequeue::Url(u) => assert_eq!(u.path(), "/b"),
            other => panic!("expected URL, got {:?}", other),
        }
    }

    #[test]
    fn test_budget_decrements_per_dequeue() {
        let frontier = Frontier::new(2);
        frontier.try_admit(&url("https://shop.test/a"));
        frontier.try_admit(&url("https://shop.test/b"));
        frontier.try_admit(&url("https://shop.test/c"));

        assert!(matches!(frontier.begin_fetch(), Dequeue::Url(_)));
        assert_eq!(frontier.budget_remaining(), 1);
        assert!(matches!(frontier.begin_fetch(), Dequeue::Url(_)));
        assert_eq!(frontier.budget_remaining(), 0);

        // Budget exhausted: /c stays queued, verdict is Pending while the
        // two reserved fetches are still in flight
        assert_eq!(frontier.begin_fetch(), Dequeue::Pending);
        frontier.finish_fetch();
        frontier.finish_fetch();
        assert_eq!(frontier.begin_fetch(), Dequeue::Drained);
        assert_eq!(frontier.queued_len(), 1);
    }

    #[test]
    fn test_empty_frontier_drained_immediately() {
        let frontier = Frontier::new(10);
        assert_eq!(frontier.begin_fetch(), Dequeue::Drained);
    }

    #[test]
    fn test_pending_while_in_flight() {
        let frontier = Frontier::new(10);
        frontier.try_admit(&url("https://shop.test/a"));
        assert!(matches!(frontier.begin_fetch(), Dequeue::Url(_)));

        // Queue empty but one fetch outstanding: not drained yet
        assert_eq!(frontier.begin_fetch(), Dequeue::Pending);

        // The outstanding fetch admits another URL, then completes
        frontier.try_admit(&url("https://shop.test/b"));
        frontier.finish_fetch();
        assert!(matches!(frontier.begin_fetch(), Dequeue::Url(_)));
    }

    #[test]
    fn test_drained_after_last_fetch_completes() {
        let frontier = Frontier::new(10);
        frontier.try_admit(&url("https://shop.test/a"));
        assert!(matches!(frontier.begin_fetch(), Dequeue::Url(_)));
        frontier.finish_fetch();
        assert_eq!(frontier.begin_fetch(), Dequeue::Drained);
    }

    #[test]
    fn test_admission_open_after_budget_exhausted() {
        let frontier = Frontier::new(1);
        frontier.try_admit(&url("https://shop.test/a"));
        assert!(matches!(frontier.begin_fetch(), Dequeue::Url(_)));
        assert_eq!(frontier.budget_remaining(), 0);

        // Links discovered by the in-flight fetch still get admitted
        assert!(frontier.try_admit(&url("https://shop.test/b")));
        frontier.finish_fetch();

        // But never fetched
        assert_eq!(frontier.begin_fetch(), Dequeue::Drained);
        assert_eq!(frontier.queued_len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_admission_exactly_one_winner() {
        let frontier = Arc::new(Frontier::new(100));
        let target = url("https://shop.test/products/1");

        let mut handles = Vec::new();
        for _ in 0..32 {
            let frontier = Arc::clone(&frontier);
            let target = target.clone();
            handles.push(tokio::spawn(async move { frontier.try_admit(&target) }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(frontier.queued_len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_dequeue_respects_budget() {
        let frontier = Arc::new(Frontier::new(5));
        for i in 0..20 {
            frontier.try_admit(&url(&format!("https://shop.test/p{}", i)));
        }

        let mut handles = Vec::new();
        for _ in 0..20 {
            let frontier = Arc::clone(&frontier);
            handles.push(tokio::spawn(async move {
                matches!(frontier.begin_fetch(), Dequeue::Url(_))
            }));
        }

        let successes = {
            let mut n = 0;
            for handle in handles {
                if handle.await.unwrap() {
                    n += 1;
                }
            }
            n
        };
        assert_eq!(successes, 5);
        assert_eq!(frontier.budget_remaining(), 0);
    }
}
