//! # Checkout State
//!
//! Holds the checkout attempt in progress, if any. `begin_checkout` replaces
//! it; a completed flow stays in place so the confirmation step can be shown
//! until the next attempt.

use std::sync::{Arc, Mutex, PoisonError};

use storefront_core::CheckoutFlow;

use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct CheckoutStore {
    flow: Arc<Mutex<Option<CheckoutFlow>>>,
}

impl CheckoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with write access to the checkout slot.
    pub fn with_slot_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Option<CheckoutFlow>) -> R,
    {
        let mut flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut flow)
    }

    /// Executes a function against the active flow.
    ///
    /// ## Errors
    /// `CHECKOUT_ERROR` when no checkout has been started.
    pub fn with_flow_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut CheckoutFlow) -> Result<R, ApiError>,
    {
        self.with_slot_mut(|slot| match slot {
            Some(flow) => f(flow),
            None => Err(ApiError::checkout("Checkout has not been started")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_flow_access_requires_started_checkout() {
        let store = CheckoutStore::new();
        let err = store.with_flow_mut(|flow| Ok(flow.step())).unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
    }
}
