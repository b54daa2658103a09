//! Physical bus sharing: several register buses (one per device) executing
//! through a single owner.
//!
//! The bus lives in an `embassy_sync` blocking mutex; every transaction holds
//! the lock from its first phase to its last, so transactions of different
//! devices never interleave.
//!
//! # Example
//!
//! ```rust,ignore
//! use core::cell::RefCell;
//! use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
//! use static_cell::StaticCell;
//!
//! static BUS: StaticCell<Mutex<CriticalSectionRawMutex, RefCell<MyTransport>>> = StaticCell::new();
//! let bus = BUS.init(Mutex::new(RefCell::new(transport)));
//!
//! let mut baro = RegisterBus::new(SharedTransport::new(bus));
//! let mut imu = RegisterBus::new(SharedTransport::new(bus));
//! ```
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::core::{Phase, RegisterAccess, RegisterAddress, TransactionResult};
use crate::protocol::transport::traits::transport::Transport;

/// Handle onto a transport shared behind a blocking mutex.
pub struct SharedTransport<'a, M: RawMutex, T> {
    bus: &'a Mutex<M, RefCell<T>>,
}

impl<'a, M: RawMutex, T> SharedTransport<'a, M, T> {
    #[inline]
    pub const fn new(bus: &'a Mutex<M, RefCell<T>>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, T: Transport> Transport for SharedTransport<'_, M, T> {
    fn execute(&mut self, phases: &mut [Phase<'_>]) -> TransactionResult {
        self.bus.lock(|cell| match cell.try_borrow_mut() {
            Ok(mut transport) => transport.execute(phases),
            // Re-entered from inside another transaction on the same bus.
            Err(_) => TransactionResult::failed(),
        })
    }

    fn register_address(&self, address: RegisterAddress, access: RegisterAccess) -> u8 {
        self.bus
            .lock(|cell| cell.borrow().register_address(address, access))
    }
}
