//! Gravity module - elapsed time to gravity steps, and lock delay
//!
//! Gravity is derived from timestamps rather than counted per callback:
//! `steps = (now - last_gravity) / interval`. A driver that delivers ticks late
//! or coalesced still gets the right number of rows.
//!
//! Lock delay per falling block:
//!
//! ```text
//! Airborne --(comes to rest)--> Grounded { ground_timer = settle }
//! Grounded --(tick)--> ground_timer -= grounded time, total_ground += grounded time
//! Grounded --(shift/rotate)--> ground_timer = settle   (total_ground kept)
//! Grounded --(ground_timer <= 0 || total_ground > max_ground)--> Locked
//! ```
//!
//! Ground time is charged from the moment the block came to rest, so one late
//! tick that covers both the landing and the settle time locks the block at
//! the same moment a steady run of ticks would.

use crate::scoring::LevelTuning;

/// Number of whole gravity intervals between `last_ms` and `now_ms`
pub fn gravity_steps(now_ms: u64, last_ms: u64, interval_ms: u32) -> u64 {
    if interval_ms == 0 {
        return 0;
    }
    now_ms.saturating_sub(last_ms) / interval_ms as u64
}

/// Whether the falling block rests on an obstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contact {
    Airborne,
    Grounded { ground_timer_ms: i64 },
}

/// Lock-delay bookkeeping for one falling block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockDelay {
    contact: Contact,
    total_ground_ms: u64,
}

impl LockDelay {
    /// State of a freshly spawned block
    pub fn new() -> Self {
        Self {
            contact: Contact::Airborne,
            total_ground_ms: 0,
        }
    }

    pub fn contact(&self) -> Contact {
        self.contact
    }

    /// Remaining grace before a lock, `None` while airborne
    pub fn ground_timer_ms(&self) -> Option<i64> {
        match self.contact {
            Contact::Airborne => None,
            Contact::Grounded { ground_timer_ms } => Some(ground_timer_ms),
        }
    }

    /// Ground time accumulated over the block's lifetime
    pub fn total_ground_ms(&self) -> u64 {
        self.total_ground_ms
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self.contact, Contact::Grounded { .. })
    }

    /// Charge `grounded_ms` of ground time.
    ///
    /// `grounded_ms` is the part of the evaluated window the block spent at
    /// rest. Returns the offset into that time at which the block must lock,
    /// or `None` while it may keep falling or sliding.
    pub fn evaluate(
        &mut self,
        grounded: bool,
        grounded_ms: u64,
        tuning: &LevelTuning,
    ) -> Option<u64> {
        if !grounded {
            self.contact = Contact::Airborne;
            return None;
        }

        let timer = match self.contact {
            Contact::Airborne => tuning.settle_ms as i64,
            Contact::Grounded { ground_timer_ms } => ground_timer_ms,
        };
        // The cap is exceeded once the total passes it by a single millisecond.
        let until_cap = (tuning.max_ground_ms as u64 + 1).saturating_sub(self.total_ground_ms);
        let due = (timer.max(0) as u64).min(until_cap);

        self.contact = Contact::Grounded {
            ground_timer_ms: timer.saturating_sub(grounded_ms as i64),
        };
        self.total_ground_ms = self.total_ground_ms.saturating_add(grounded_ms);

        (grounded_ms >= due).then_some(due)
    }

    /// Re-arm after a spawn, shift or rotate.
    ///
    /// A block left at rest gets a full settle timer; one left in the air
    /// becomes airborne. The accumulated ground time is kept either way.
    pub fn on_move(&mut self, grounded: bool, tuning: &LevelTuning) {
        self.contact = if grounded {
            Contact::Grounded {
                ground_timer_ms: tuning.settle_ms as i64,
            }
        } else {
            Contact::Airborne
        };
    }
}

impl Default for LockDelay {
    fn default() -> Self {
        Self::new()
    }
}
