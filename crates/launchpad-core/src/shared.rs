//! Thread-safe handle for multi-threaded hosts.
//!
//! Every call takes the same lock, so two purchases on one sale can never
//! price against the same `sold` value.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::events::RegistryEvent;
use crate::registry::SaleRegistry;
use crate::request::{Call, Response};

/// Cloneable handle serializing all access to one registry
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<SaleRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: SaleRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Execute one call under the lock
    pub fn execute(&self, call: &Call) -> LaunchpadResult<Response> {
        self.lock()?.execute(call)
    }

    /// Run a closure with exclusive access, e.g. for reads spanning several accessors
    pub fn with<R>(&self, f: impl FnOnce(&mut SaleRegistry) -> R) -> LaunchpadResult<R> {
        Ok(f(&mut *self.lock()?))
    }

    /// Take the events recorded since the last drain
    ///
    /// Events accumulate until a host drains them.
    pub fn drain_events(&self) -> LaunchpadResult<Vec<RegistryEvent>> {
        Ok(self.lock()?.drain_events())
    }

    /// Clone out the current state
    pub fn snapshot(&self) -> LaunchpadResult<SaleRegistry> {
        self.with(|registry| registry.clone())
    }

    fn lock(&self) -> LaunchpadResult<MutexGuard<'_, SaleRegistry>> {
        self.inner.lock().map_err(|_| LaunchpadError::StatePoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_CREATION_FEE, SCALE};
    use crate::registry::RegistryConfig;
    use crate::request::Request;
    use solana_program::pubkey::Pubkey;
    use std::thread;

    #[test]
    fn test_concurrent_buys_get_distinct_positions() {
        let owner = Pubkey::new_unique();
        let mut registry = SaleRegistry::new(owner, Pubkey::new_unique(), RegistryConfig::default()).unwrap();
        registry.create(&Pubkey::new_unique(), "Shared", "SHR", DEFAULT_CREATION_FEE).unwrap();
        let shared = SharedRegistry::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let buyer = Pubkey::new_unique();
                    let call = Call::new(buyer, Request::Buy { sale_id: 0, units: 1_000 * SCALE }).with_value(SCALE);
                    shared.execute(&call).unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let state = shared.snapshot().unwrap();
        assert_eq!(state.get_sale(0).unwrap().sold, 8_000 * SCALE);
        assert_eq!(state.reserve_of(0).unwrap(), 992_000 * SCALE);
        state.check_invariants().unwrap();

        let events = shared.drain_events().unwrap();
        assert_eq!(events.len(), 9);
        assert!(matches!(events[0], RegistryEvent::Created { sale_id: 0, .. }));
        assert!(events[1..].iter().all(|event| matches!(event, RegistryEvent::Bought { sale_id: 0, .. })));
        assert!(shared.drain_events().unwrap().is_empty());
    }
}
