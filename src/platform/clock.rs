//! Binding between a session's countdown and a platform interval timer
//!
//! The session only says which countdown run should be ticking
//! ([`crate::sim::Session::active_countdown`]). Once per frame the platform
//! reconciles: if the wanted run differs from the armed one, the old
//! interval is stopped before a new one is started for the new id. At most
//! one interval is ever live.

use crate::sim::CountdownId;

/// Something that can run a callback once a second for a countdown run
pub trait IntervalHost {
    type Handle;

    /// Start an interval delivering ticks for `id`
    fn start(&mut self, id: CountdownId) -> Option<Self::Handle>;

    fn stop(&mut self, handle: Self::Handle);
}

#[derive(Debug)]
pub struct CountdownBinding<H> {
    armed: Option<(CountdownId, H)>,
}

impl<H> Default for CountdownBinding<H> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<H> CountdownBinding<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the live interval match `wanted`. Returns true if anything changed.
    pub fn reconcile<T>(&mut self, host: &mut T, wanted: Option<CountdownId>) -> bool
    where
        T: IntervalHost<Handle = H>,
    {
        if self.armed() == wanted {
            return false;
        }
        if let Some((id, handle)) = self.armed.take() {
            log::debug!("Stopping countdown interval {}", id.value());
            host.stop(handle);
        }
        if let Some(id) = wanted {
            match host.start(id) {
                Some(handle) => self.armed = Some((id, handle)),
                None => log::warn!("Could not start countdown interval {}", id.value()),
            }
        }
        true
    }

    /// Stop whatever is armed
    pub fn release<T>(&mut self, host: &mut T)
    where
        T: IntervalHost<Handle = H>,
    {
        if let Some((_, handle)) = self.armed.take() {
            host.stop(handle);
        }
    }

    pub fn armed(&self) -> Option<CountdownId> {
        self.armed.as_ref().map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Countdown;

    #[derive(Default)]
    struct FakeHost {
        next: u32,
        live: Vec<u32>,
        starts: u32,
        stops: u32,
    }

    impl IntervalHost for FakeHost {
        type Handle = u32;

        fn start(&mut self, _id: CountdownId) -> Option<u32> {
            self.next += 1;
            self.starts += 1;
            self.live.push(self.next);
            Some(self.next)
        }

        fn stop(&mut self, handle: u32) {
            self.stops += 1;
            self.live.retain(|h| *h != handle);
        }
    }

    #[test]
    fn test_restart_swaps_exactly_one_interval() {
        let mut host = FakeHost::default();
        let mut binding = CountdownBinding::new();
        let mut countdown = Countdown::new();

        let first = countdown.restart(15);
        assert!(binding.reconcile(&mut host, countdown.active()));
        assert!(!binding.reconcile(&mut host, countdown.active()));
        assert_eq!(binding.armed(), Some(first));

        countdown.restart(15);
        binding.reconcile(&mut host, countdown.active());
        assert_eq!(host.starts, 2);
        assert_eq!(host.stops, 1);
        assert_eq!(host.live.len(), 1);
    }

    #[test]
    fn test_cancel_and_release() {
        let mut host = FakeHost::default();
        let mut binding = CountdownBinding::new();
        let mut countdown = Countdown::new();

        countdown.restart(5);
        binding.reconcile(&mut host, countdown.active());
        countdown.cancel();
        binding.reconcile(&mut host, countdown.active());
        assert!(host.live.is_empty());
        assert_eq!(binding.armed(), None);

        countdown.restart(5);
        binding.reconcile(&mut host, countdown.active());
        binding.release(&mut host);
        binding.release(&mut host);
        assert!(host.live.is_empty());
        assert_eq!(host.stops, 2);
    }
}
