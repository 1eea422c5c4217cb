//! Debounced patient lookup for the reception autocomplete.
//!
//! Every lookup registers a new generation for its user and waits out the
//! debounce delay. A lookup whose generation is no longer the latest when it
//! wakes up, or when the backend answers, is abandoned and yields `None`.
//! Generations come from one counter shared by all users and are never reused.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::patient::PatientSummary;
use crate::models::auth::AuthenticatedUser;
use crate::repository::PatientReader;
use crate::services::{ServiceError, ServiceResult, ensure_any_role, require_clinic};
use crate::{CLINIC_MANAGER_ROLE, DOCTOR_ROLE, SECRETARY_ROLE};

/// Shortest query forwarded to the backend.
pub const MIN_QUERY_CHARS: usize = 2;

pub struct LookupGate {
    delay: Duration,
    next_generation: AtomicU64,
    generations: Mutex<HashMap<String, u64>>,
}

impl LookupGate {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_generation: AtomicU64::new(1),
            generations: Mutex::new(HashMap::new()),
        }
    }

    fn begin(&self, key: &str) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        self.generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), generation);
        generation
    }

    fn is_current(&self, key: &str, generation: u64) -> bool {
        self.generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .is_some_and(|latest| *latest == generation)
    }

    /// Drops the user's entry once their latest lookup is done. Older
    /// lookups still in flight stay stale since no later lookup can take
    /// their generation.
    fn finish(&self, key: &str, generation: u64) {
        let mut generations = self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if generations.get(key) == Some(&generation) {
            generations.remove(key);
        }
    }
}

/// Searches patients by name or phone.
///
/// Returns `Ok(None)` when a newer lookup from the same user superseded this one.
pub async fn lookup_patients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    gate: &LookupGate,
    query: &str,
) -> ServiceResult<Option<Vec<PatientSummary>>>
where
    R: PatientReader + ?Sized,
{
    ensure_any_role(user, &[SECRETARY_ROLE, CLINIC_MANAGER_ROLE, DOCTOR_ROLE])?;
    require_clinic(user)?;

    let term = query.trim();
    if term.chars().count() < MIN_QUERY_CHARS {
        return Ok(Some(Vec::new()));
    }

    let generation = gate.begin(&user.sub);

    tokio::time::sleep(gate.delay).await;
    if !gate.is_current(&user.sub, generation) {
        log::debug!("Patient lookup '{term}' superseded before dispatch");
        return Ok(None);
    }

    let result = repo.search_patients(term).await;

    if !gate.is_current(&user.sub, generation) {
        log::debug!("Patient lookup '{term}' superseded in flight");
        return Ok(None);
    }
    gate.finish(&user.sub, generation);

    result.map(Some).map_err(|err| {
        log::error!("Failed to search patients: {err}");
        ServiceError::from(err)
    })
}
