//! Per-resource request generations
//!
//! Starting a request for a resource cancels the in-flight one and bumps the
//! generation. A response is applied only if its ticket is still current.

use super::cancellation::CancellationToken;
use super::load_state::LoadState;
use super::source::{FetchError, ResourceKind};
use crate::logging::codes;
use crate::{log_debug, log_error};
use std::collections::HashMap;
use std::sync::Mutex;

/// Handle for one in-flight request
#[derive(Debug, Clone)]
pub struct RequestTicket {
    pub resource: ResourceKind,
    pub generation: u64,
    pub token: CancellationToken,
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    token: CancellationToken,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    slots: Mutex<HashMap<ResourceKind, Slot>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any previous request for `resource` and issues a new ticket
    pub fn begin(&self, resource: ResourceKind) -> RequestTicket {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let token = CancellationToken::new();
        let generation = match slots.get(&resource) {
            Some(previous) => {
                previous.token.cancel();
                previous.generation + 1
            }
            None => 1,
        };
        slots.insert(
            resource,
            Slot {
                generation,
                token: token.clone(),
            },
        );

        RequestTicket {
            resource,
            generation,
            token,
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots
            .get(&ticket.resource)
            .is_some_and(|slot| slot.generation == ticket.generation)
    }

    /// Cancel whatever is in flight for every resource
    pub fn cancel_all(&self) {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        for slot in slots.values() {
            slot.token.cancel();
        }
    }

    /// Turns a response into the next state, or `None` when it is stale or
    /// was cancelled
    pub fn complete<T>(&self, ticket: &RequestTicket, result: Result<T, FetchError>) -> Option<LoadState<T>> {
        if !self.is_current(ticket) {
            log_debug!(
                "Discarding stale response",
                "code" => codes::fetch::STALE_RESPONSE_DISCARDED,
                "resource" => ticket.resource,
                "generation" => ticket.generation
            );
            return None;
        }

        match &result {
            Err(FetchError::Cancelled { resource }) => {
                log_debug!(
                    "Fetch cancelled",
                    "code" => codes::fetch::FETCH_CANCELLED,
                    "resource" => resource
                );
            }
            Err(e) => {
                log_error!(
                    codes::fetch::FETCH_FAILED,
                    &e.to_string(),
                    "resource" => ticket.resource
                );
            }
            Ok(_) => {}
        }

        LoadState::from_fetch(result)
    }
}
