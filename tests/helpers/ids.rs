use std::sync::atomic::{AtomicUsize, Ordering};

use offline_proxy_event::ids::IdGenerator;

/// Hands out `id-1`, `id-2`, ... so assertions can tell both request ids apart.
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
