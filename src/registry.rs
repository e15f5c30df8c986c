// src/registry.rs

//! Process-wide selection of the active [`ProcessGateway`].
//!
//! Passing a gateway explicitly (`Arc<dyn ProcessGateway>` or
//! `&dyn ProcessGateway`) is the preferred way to wire code up. This module
//! is the global substitution point for code that cannot take one as a
//! parameter.
//!
//! - [`current_gateway`] returns the installed gateway, installing
//!   [`DefaultProcessGateway`] on first use. Concurrent first calls still
//!   construct exactly one default.
//! - [`set_gateway`] replaces it for every later lookup.
//! - [`override_gateway`] does the same but puts the previous state back
//!   when the returned guard is dropped (test harnesses).
//!
//! Every lookup hands out its own `Arc`, so an operation that already holds
//! one keeps dispatching to that gateway even if the slot is swapped
//! mid-call.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::gateway::{DefaultProcessGateway, ProcessGateway};

// The slot always holds a complete `Arc` (or nothing), so a poisoned lock
// still contains a consistent value and is safe to keep using.
static ACTIVE: RwLock<Option<Arc<dyn ProcessGateway>>> = RwLock::new(None);

/// Return the active gateway, installing the default one if none is set.
pub fn current_gateway() -> Arc<dyn ProcessGateway> {
    if let Some(gateway) = ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Arc::clone(gateway);
    }

    let mut slot = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
    // Another caller may have won the race between the two locks.
    let gateway = slot.get_or_insert_with(|| {
        debug!("installing default process gateway");
        Arc::new(DefaultProcessGateway::new())
    });
    Arc::clone(gateway)
}

/// Install `gateway` for all later [`current_gateway`] calls.
///
/// Returns whatever was installed before, `None` if the default had never
/// been created.
pub fn set_gateway(gateway: Arc<dyn ProcessGateway>) -> Option<Arc<dyn ProcessGateway>> {
    debug!(?gateway, "replacing process gateway");
    swap(Some(gateway))
}

fn swap(next: Option<Arc<dyn ProcessGateway>>) -> Option<Arc<dyn ProcessGateway>> {
    let mut slot = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, next)
}

/// Install `gateway` until the returned guard is dropped.
///
/// On drop the previous state is restored exactly, including "nothing
/// installed yet", so the next lookup builds a fresh default. Guards must be
/// dropped in reverse order of creation.
#[must_use = "the override is undone as soon as the guard is dropped"]
pub fn override_gateway(gateway: Arc<dyn ProcessGateway>) -> GatewayOverride {
    let previous = set_gateway(gateway);
    GatewayOverride { previous }
}

/// Guard returned by [`override_gateway`].
#[derive(Debug)]
pub struct GatewayOverride {
    previous: Option<Arc<dyn ProcessGateway>>,
}

impl Drop for GatewayOverride {
    fn drop(&mut self) {
        debug!("restoring previous process gateway");
        swap(self.previous.take());
    }
}
