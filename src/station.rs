//! The weather station: holds the latest reading and the observer chain.
//!
//! The chain is a singly linked list rooted at `head`. Registration order is
//! chain order. Each node remembers which station it is linked into, which
//! makes duplicate registration an O(1) check and lets the station refuse a
//! node that already belongs to another chain. A `tail` pointer keeps append
//! O(1); removal walks from the head to find the predecessor.
//!
//! There is exactly one way to push data in: `set_measurements` stores the
//! reading and dispatches it before returning.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::{self, Component};
use crate::model::{Reading, StationError, StationId};
use crate::observer::{same_node, Link, Linked};
use crate::outlet::{ConsoleOutlet, Outlet};

static NEXT_STATION_ID: AtomicU64 = AtomicU64::new(1);

/// Subject of the observer chain.
pub struct Station {
    id: StationId,
    head: Option<Link>,
    tail: Option<Link>,
    len: usize,
    last_reading: Option<Reading>,
    outlet: Box<dyn Outlet>,
}

impl Default for Station {
    fn default() -> Self {
        Self::new()
    }
}

impl Station {
    /// Empty station writing to stdout.
    pub fn new() -> Self {
        Self::with_outlet(Box::new(ConsoleOutlet))
    }

    /// Empty station writing to the given outlet.
    pub fn with_outlet(outlet: Box<dyn Outlet>) -> Self {
        Self {
            id: StationId(NEXT_STATION_ID.fetch_add(1, Ordering::Relaxed)),
            head: None,
            tail: None,
            len: 0,
            last_reading: None,
            outlet,
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    /// First observer in the chain.
    pub fn head(&self) -> Option<Link> {
        self.head.clone()
    }

    /// Most recent reading, if one has arrived.
    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Snapshot of the chain, head first.
    pub fn observers(&self) -> Vec<Link> {
        let mut chain = Vec::with_capacity(self.len);
        let mut cursor = self.head.clone();
        while let Some(node) = cursor {
            cursor = node.next();
            chain.push(node);
        }
        chain
    }

    /// Whether `observer` is currently linked into this station.
    pub fn contains<O: ?Sized>(&self, observer: &Rc<Linked<O>>) -> bool {
        observer.owner() == Some(self.id)
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Append `observer` to the chain.
    ///
    /// Registering a node that is already in this chain does nothing. When a
    /// reading already exists the new node, and only the new node, receives
    /// it immediately; a failure there is returned but the node stays
    /// registered.
    pub fn register(&mut self, observer: Link) -> Result<(), StationError> {
        match observer.owner() {
            Some(owner) if owner == self.id => {
                logging::debug(
                    Component::Station,
                    Some(observer.name()),
                    "already registered, ignoring",
                );
                return Ok(());
            }
            Some(owner) => return Err(StationError::LinkedElsewhere(owner)),
            None => {}
        }

        observer.set_owner(Some(self.id));
        match self.tail.take() {
            Some(tail) => tail.set_next(Some(Rc::clone(&observer))),
            None => self.head = Some(Rc::clone(&observer)),
        }
        self.tail = Some(Rc::clone(&observer));
        self.len += 1;
        logging::debug(
            Component::Station,
            Some(observer.name()),
            &format!("registered at position {}", self.len),
        );

        if let Some(reading) = self.last_reading {
            observer
                .handle(&reading, &mut *self.outlet)
                .inspect_err(|e| {
                    logging::log_observer_failure(observer.name(), "late-join delivery", e)
                })?;
        }
        Ok(())
    }

    /// Unlink `observer` from the chain and clear its successor link.
    ///
    /// Removing a node that is not in this chain does nothing.
    pub fn remove<O: ?Sized>(&mut self, observer: &Rc<Linked<O>>) {
        if !self.contains(observer) {
            logging::debug(
                Component::Station,
                Some(observer.name()),
                "not registered, nothing to remove",
            );
            return;
        }

        let mut prev: Option<Link> = None;
        let mut cursor = self.head.clone();
        while let Some(node) = cursor {
            if same_node(&node, observer) {
                let successor = node.take_next();
                match &prev {
                    Some(p) => p.set_next(successor.clone()),
                    None => self.head = successor.clone(),
                }
                if successor.is_none() {
                    self.tail = prev;
                }
                node.set_owner(None);
                self.len -= 1;
                logging::debug(Component::Station, Some(node.name()), "removed");
                return;
            }
            cursor = node.next();
            prev = Some(node);
        }
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Store a new reading and deliver it to the whole chain.
    pub fn set_measurements(
        &mut self,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
    ) -> Result<(), StationError> {
        self.last_reading = Some(Reading::new(temperature, humidity, wind_speed));
        self.notify_observers()
    }

    /// Write a progress line to the station's outlet, in line with whatever
    /// the observers emit.
    pub fn announce(&mut self, line: &str) -> Result<(), StationError> {
        self.outlet.announce(line)
    }

    /// Deliver the current reading from the head down the chain.
    ///
    /// Without a reading or without observers this is a no-op. The first
    /// observer failure stops delivery and is returned.
    pub fn notify_observers(&mut self) -> Result<(), StationError> {
        let (Some(reading), Some(head)) = (self.last_reading, self.head.clone()) else {
            return Ok(());
        };

        logging::debug(
            Component::Station,
            None,
            &format!("dispatching to {} observer(s): {}", self.len, reading),
        );
        head.handle(&reading, &mut *self.outlet).inspect_err(|e| {
            logging::log_observer_failure(e.observer().unwrap_or("chain"), "dispatch", e)
        })
    }
}

impl Drop for Station {
    fn drop(&mut self) {
        // Unlink iteratively so members can join another station afterwards.
        self.tail = None;
        let mut cursor = self.head.take();
        while let Some(node) = cursor {
            cursor = node.take_next();
            node.set_owner(None);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
