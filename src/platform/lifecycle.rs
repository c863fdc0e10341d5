//! Guaranteed teardown of everything a mounted game registered
//!
//! Clocks (the frame callback and the countdown interval) are cancelled
//! before listeners are detached, so no callback can run against a session
//! whose listeners are half gone. Teardown runs at most once, whether it is
//! triggered by the back button or by dropping the owner.

type Cleanup = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct Lifecycle {
    clocks: Vec<Cleanup>,
    listeners: Vec<Cleanup>,
    torn_down: bool,
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("clocks", &self.clocks.len())
            .field("listeners", &self.listeners.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clock cancellation
    pub fn on_clock(&mut self, cleanup: impl FnOnce() + 'static) {
        if self.torn_down {
            cleanup();
        } else {
            self.clocks.push(Box::new(cleanup));
        }
    }

    /// Register a listener removal
    pub fn on_listener(&mut self, cleanup: impl FnOnce() + 'static) {
        if self.torn_down {
            cleanup();
        } else {
            self.listeners.push(Box::new(cleanup));
        }
    }

    /// Run all cleanups, clocks first. Returns false if already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        let clocks = std::mem::take(&mut self.clocks);
        let listeners = std::mem::take(&mut self.listeners);
        log::debug!(
            "Tearing down {} clocks and {} listeners",
            clocks.len(),
            listeners.len()
        );
        for cleanup in clocks.into_iter().chain(listeners) {
            cleanup();
        }
        true
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = log.clone();
        let make = move |name: &'static str| {
            let log = handle.clone();
            Box::new(move || log.borrow_mut().push(name)) as Box<dyn FnOnce()>
        };
        (log, make)
    }

    #[test]
    fn test_clocks_before_listeners() {
        let (log, make) = recorder();
        let mut lc = Lifecycle::new();
        lc.on_listener(make("keydown"));
        lc.on_clock(make("raf"));
        lc.on_listener(make("keyup"));
        lc.on_clock(make("interval"));

        assert!(lc.teardown());
        assert_eq!(*log.borrow(), vec!["raf", "interval", "keydown", "keyup"]);
    }

    #[test]
    fn test_teardown_twice_runs_once() {
        let (log, make) = recorder();
        let mut lc = Lifecycle::new();
        lc.on_clock(make("raf"));
        assert!(lc.teardown());
        assert!(!lc.teardown());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_drop_tears_down() {
        let (log, make) = recorder();
        {
            let mut lc = Lifecycle::new();
            lc.on_listener(make("blur"));
        }
        assert_eq!(*log.borrow(), vec!["blur"]);
    }

    #[test]
    fn test_late_registration_runs_immediately() {
        let (log, make) = recorder();
        let mut lc = Lifecycle::new();
        lc.teardown();
        lc.on_clock(make("late"));
        assert_eq!(*log.borrow(), vec!["late"]);
    }
}
