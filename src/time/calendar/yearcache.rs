use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::{Arc, PoisonError, RwLock};

use crate::calendarerror::CalendarError;
use crate::time::calendar::holidayset::HolidaySet;

/// Per-year store of computed holiday sets with compute-once semantics.
///
/// Lookups take the read lock. A miss takes the write lock, checks again and
/// computes while still holding it, so two threads asking for the same new
/// year never both run the rules. Failed computations are not stored.
///
/// Nothing is evicted on its own; a caller querying arbitrary years should
/// call `retain_years` now and then.
pub struct YearCache {
    sets: RwLock<HashMap<i32, Arc<HolidaySet>>>,
}

impl YearCache {
    pub fn new() -> Self {
        Self {
            sets: RwLock::new(HashMap::new()),
        }
    }

    fn get(&self, year: i32) -> Option<Arc<HolidaySet>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        let sets = self.sets.read().unwrap_or_else(PoisonError::into_inner);
        sets.get(&year).cloned()
    }

    pub fn get_or_try_compute(
        &self,
        year: i32,
        compute: impl FnOnce() -> Result<HolidaySet, CalendarError>,
    ) -> Result<Arc<HolidaySet>, CalendarError> {
        if let Some(set) = self.get(year) {
            return Ok(set);
        }

        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = sets.get(&year) {
            return Ok(Arc::clone(set));
        }

        let set = Arc::new(compute()?);
        sets.insert(year, Arc::clone(&set));
        Ok(set)
    }

    /// Drops every cached year outside `years`.
    pub fn retain_years(&self, years: RangeInclusive<i32>) {
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        sets.retain(|year, _| years.contains(year));
    }

    pub fn cached_years(&self) -> Vec<i32> {
        let sets = self.sets.read().unwrap_or_else(PoisonError::into_inner);
        let mut years: Vec<i32> = sets.keys().copied().collect();
        years.sort();
        years
    }

    pub fn len(&self) -> usize {
        self.sets.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for YearCache {
    fn default() -> Self {
        Self::new()
    }
}
