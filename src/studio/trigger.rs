use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The generate control. Clones share one disabled flag.
#[derive(Debug, Clone, Default)]
pub struct TriggerControl {
    disabled: Arc<AtomicBool>,
}

impl TriggerControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Disables the control until the returned guard is dropped.
    /// `None` when it is already disabled.
    pub fn disable(&self) -> Option<TriggerGuard> {
        self.disabled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| TriggerGuard {
                disabled: Arc::clone(&self.disabled),
            })
    }
}

#[derive(Debug)]
pub struct TriggerGuard {
    disabled: Arc<AtomicBool>,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.disabled.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_reenables_on_drop() {
        let trigger = TriggerControl::new();
        assert!(!trigger.is_disabled());

        let guard = trigger.disable().unwrap();
        assert!(trigger.is_disabled());
        assert!(trigger.clone().is_disabled());
        assert!(trigger.disable().is_none());

        drop(guard);
        assert!(!trigger.is_disabled());
        assert!(trigger.disable().is_some());
    }

    #[test]
    fn test_guard_reenables_on_panic() {
        let trigger = TriggerControl::new();
        let shared = trigger.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = shared.disable().unwrap();
            panic!("service exploded");
        });
        assert!(result.is_err());
        assert!(!trigger.is_disabled());
    }
}
