// src/core/threads.rs

use log::debug;

/// Resolves a requested worker count; zero or negative means one worker per hardware thread.
pub fn resolve_worker_count(requested: isize) -> usize {
    if requested <= 0 {
        let available = num_cpus::get().max(1);
        debug!("Worker count {} normalised to hardware parallelism {}", requested, available);
        available
    } else {
        requested as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_count_is_kept() {
        assert_eq!(resolve_worker_count(1), 1);
        assert_eq!(resolve_worker_count(16), 16);
    }

    #[test]
    fn test_non_positive_count_uses_hardware() {
        assert_eq!(resolve_worker_count(0), num_cpus::get().max(1));
        assert_eq!(resolve_worker_count(-4), num_cpus::get().max(1));
    }
}
