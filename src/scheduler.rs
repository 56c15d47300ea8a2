//! Cooperative, non-blocking task scheduling.
//!
//! A [`Scheduler`] owns a fixed array of task slots built once at startup.
//! Each [`tick`](Scheduler::tick) walks the slots in registration order and
//! runs every task whose interval gate has opened. Tasks run to completion
//! and must return quickly so input polling is not starved.
//!
//! State shared between tasks lives in a context value `C` that the caller
//! owns and lends to every tick. Tasks never hold references to each other.
//!
//! # Usage
//!
//! ```ignore
//! let mut poll = |ctx: &mut App, now: Timestamp| ctx.poll(now);
//! let mut render = |ctx: &mut App, now: Timestamp| ctx.render(now);
//!
//! let mut scheduler = Scheduler::new(
//!     clock.now(),
//!     [
//!         TaskSlot::always(&mut poll),
//!         TaskSlot::every(Milliseconds(100), &mut render),
//!     ],
//! );
//!
//! scheduler.run(&mut app, &clock);
//! ```

use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// A unit of periodic work: given the current time, optionally act.
///
/// Any `FnMut(&mut C, I)` closure is a task. Failures inside a task must be
/// handled there; the scheduler has no error channel.
pub trait Task<C, I: TimeInstant> {
    fn run(&mut self, ctx: &mut C, now: I);
}

impl<C, I, F> Task<C, I> for F
where
    I: TimeInstant,
    F: FnMut(&mut C, I),
{
    fn run(&mut self, ctx: &mut C, now: I) {
        self(ctx, now)
    }
}

/// Interval gate for one task.
///
/// Opens when strictly more than `interval` has passed since the last firing.
/// `last_fire` is reset to the polling time, not advanced by `interval`, so
/// missed intervals are dropped rather than caught up. A zero interval is
/// ungated and opens on every poll.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledTask<I: TimeInstant> {
    interval: I::Duration,
    last_fire: I,
}

impl<I: TimeInstant> ScheduledTask<I> {
    /// Creates a gate counting its first interval from `start`.
    pub fn new(interval: I::Duration, start: I) -> Self {
        Self {
            interval,
            last_fire: start,
        }
    }

    /// Returns `true` if the task should run now, and records the firing.
    pub fn poll(&mut self, now: I) -> bool {
        let ungated = self.interval == I::Duration::ZERO;
        let elapsed = now.duration_since(self.last_fire).as_millis();

        if ungated || elapsed > self.interval.as_millis() {
            self.last_fire = now;
            true
        } else {
            false
        }
    }

    pub fn interval(&self) -> I::Duration {
        self.interval
    }

    pub fn last_fire(&self) -> I {
        self.last_fire
    }
}

/// A task paired with its interval, ready to hand to [`Scheduler::new`].
pub struct TaskSlot<'a, C, I: TimeInstant> {
    interval: I::Duration,
    task: &'a mut dyn Task<C, I>,
}

impl<'a, C, I: TimeInstant> TaskSlot<'a, C, I> {
    /// Runs `task` when more than `interval` has passed since it last ran.
    pub fn every<T: Task<C, I> + 'a>(interval: I::Duration, task: &'a mut T) -> Self {
        Self { interval, task }
    }

    /// Runs `task` on every tick.
    pub fn always<T: Task<C, I> + 'a>(task: &'a mut T) -> Self {
        Self::every(I::Duration::ZERO, task)
    }
}

struct Slot<'a, C, I: TimeInstant> {
    gate: ScheduledTask<I>,
    task: &'a mut dyn Task<C, I>,
}

/// Fixed-order cooperative scheduler over `N` tasks.
///
/// The task set is fixed at construction; there is no way to add or remove
/// tasks afterwards.
pub struct Scheduler<'a, C, I: TimeInstant, const N: usize> {
    slots: [Slot<'a, C, I>; N],
}

impl<'a, C, I: TimeInstant, const N: usize> Scheduler<'a, C, I, N> {
    /// Creates a scheduler whose gates all start counting at `start`.
    pub fn new(start: I, tasks: [TaskSlot<'a, C, I>; N]) -> Self {
        Self {
            slots: tasks.map(|slot| Slot {
                gate: ScheduledTask::new(slot.interval, start),
                task: slot.task,
            }),
        }
    }

    /// Runs every eligible task once, in registration order.
    ///
    /// Returns how many tasks fired.
    pub fn tick(&mut self, ctx: &mut C, now: I) -> usize {
        let mut fired = 0;

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.gate.poll(now) {
                trace!("task {} fired", index);
                slot.task.run(ctx, now);
                fired += 1;
            }
        }

        fired
    }

    /// Polls `clock` and ticks forever.
    pub fn run<T: TimeSource<I>>(&mut self, ctx: &mut C, clock: &T) -> ! {
        loop {
            self.tick(ctx, clock.now());
        }
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{Milliseconds, Timestamp};

    #[test]
    fn gate_fires_once_past_interval() {
        let mut gate = ScheduledTask::new(Milliseconds(10), Timestamp(0));

        assert!(!gate.poll(Timestamp(0)));
        assert!(!gate.poll(Timestamp(5)));
        assert!(gate.poll(Timestamp(11)));
        assert!(!gate.poll(Timestamp(12)));
    }

    #[test]
    fn gate_resets_to_poll_time() {
        let mut gate = ScheduledTask::new(Milliseconds(10), Timestamp(0));

        // Long stall: one firing, and the next interval counts from 95.
        assert!(gate.poll(Timestamp(95)));
        assert_eq!(gate.last_fire(), Timestamp(95));
        assert!(!gate.poll(Timestamp(105)));
        assert!(gate.poll(Timestamp(106)));
    }

    #[test]
    fn zero_interval_is_ungated() {
        let mut gate = ScheduledTask::new(Milliseconds(0), Timestamp(7));

        assert!(gate.poll(Timestamp(7)));
        assert!(gate.poll(Timestamp(7)));
    }
}
