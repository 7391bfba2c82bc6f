//! Observer capability and the chain node that links observers together.
//!
//! Every observer lives inside a `Linked` node. The node carries the
//! successor link and the id of the station whose chain it belongs to; the
//! observer itself only implements `update`. Dispatch along the chain is
//! the same for every kind of observer, so it lives here in `handle` rather
//! than on the trait.
//!
//! A typed handle such as `Rc<Linked<TemperatureAlert>>` coerces into a
//! `Link`, which lets a driver keep inspecting its concrete observer while
//! the station holds the erased one. Identity is the node address.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::model::{Reading, StationError, StationId};
use crate::outlet::Outlet;

/// Per-observer policy run once for every reading delivered to it.
pub trait Observer {
    /// Label used in output and logs.
    fn name(&self) -> &'static str;

    /// React to a reading. Must not assume anything about other observers.
    /// An `Err` aborts delivery to the rest of the chain for this tick.
    fn update(&mut self, reading: &Reading, outlet: &mut dyn Outlet) -> Result<(), StationError>;
}

/// Erased handle to a chain node, as held by a station.
pub type Link = Rc<Linked<dyn Observer>>;

/// Chain node wrapping one observer.
///
/// `next` and the owning station are only ever written by `Station`.
pub struct Linked<O: ?Sized> {
    name: &'static str,
    next: RefCell<Option<Link>>,
    owner: Cell<Option<StationId>>,
    observer: RefCell<O>,
}

impl<O: Observer> Linked<O> {
    /// Wrap an observer in an unlinked node.
    pub fn new(observer: O) -> Rc<Self> {
        Rc::new(Self {
            name: observer.name(),
            next: RefCell::new(None),
            owner: Cell::new(None),
            observer: RefCell::new(observer),
        })
    }
}

impl<O: Observer + ?Sized> Linked<O> {
    /// Deliver `reading` to this node and then to every successor, in chain
    /// order. Each `update` completes before the next one starts; the first
    /// failure is returned and later observers are not called.
    pub fn handle(&self, reading: &Reading, outlet: &mut dyn Outlet) -> Result<(), StationError> {
        self.deliver(reading, outlet)?;
        let mut cursor = self.next();
        while let Some(node) = cursor {
            node.deliver(reading, outlet)?;
            cursor = node.next();
        }
        Ok(())
    }

    fn deliver(&self, reading: &Reading, outlet: &mut dyn Outlet) -> Result<(), StationError> {
        let mut observer = self
            .observer
            .try_borrow_mut()
            .map_err(|_| StationError::ObserverBusy(self.name))?;
        observer.update(reading, outlet)
    }
}

impl<O: ?Sized> Linked<O> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Successor in the chain, if any.
    pub fn next(&self) -> Option<Link> {
        self.next.borrow().clone()
    }

    /// Station this node is currently linked into.
    pub fn owner(&self) -> Option<StationId> {
        self.owner.get()
    }

    pub fn is_linked(&self) -> bool {
        self.owner.get().is_some()
    }

    /// Shared borrow of the wrapped observer.
    pub fn observer(&self) -> Ref<'_, O> {
        self.observer.borrow()
    }

    pub(crate) fn set_next(&self, next: Option<Link>) {
        *self.next.borrow_mut() = next;
    }

    pub(crate) fn take_next(&self) -> Option<Link> {
        self.next.borrow_mut().take()
    }

    pub(crate) fn set_owner(&self, owner: Option<StationId>) {
        self.owner.set(owner);
    }
}

/// True when both handles point at the same node, whatever their static type.
pub fn same_node<A: ?Sized, B: ?Sized>(a: &Rc<Linked<A>>, b: &Rc<Linked<B>>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
