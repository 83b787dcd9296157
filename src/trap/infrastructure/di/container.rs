// bellatrix_rt/src/trap/infrastructure/di/container.rs

//! # Trap System Container
//!
//! Owns both handler tables, the interrupt controller and the host channel.
//! Dispatch and registration go through here; the global instance in
//! `di::mod` is just one of these behind a `spin::Once`.

use super::traits::ControlRegisters;
use crate::trap::ds::{
    FatalError, HandlerEntry, ResumeAddress, TableKind, TrapCause, TrapContext, TrapError, TrapKind,
    types::INTERRUPT_BIT,
};
use crate::trap::infrastructure::controller::InterruptController;
use crate::trap::infrastructure::fatal;
use crate::trap::infrastructure::handler_table::HandlerTables;
use crate::util::htif::HostChannel;
use alloc::boxed::Box;
use alloc::sync::Arc;
use log::{error, trace, warn};
use spin::Mutex;

pub struct TrapSystem {
    tables: Mutex<HandlerTables>,
    controller: InterruptController,
    host: Arc<dyn HostChannel>,
}

impl TrapSystem {
    /// Builds the tables with every slot on the default handler.
    pub fn new(host: Arc<dyn HostChannel>, regs: Box<dyn ControlRegisters>) -> Self {
        Self {
            tables: Mutex::new(HandlerTables::new(&host)),
            controller: InterruptController::new(regs),
            host,
        }
    }

    /// Decodes `cause`, runs the matching handler on `context` and returns
    /// where to resume. Slots for unregistered causes hold the default
    /// handler, which does not return.
    ///
    /// The tables are locked only to copy the entry out. The handler runs
    /// unlocked, so it may fault, reopen the gate or register handlers.
    pub fn dispatch(&self, cause: usize, context: &mut TrapContext) -> ResumeAddress {
        let raw = cause;
        let cause = TrapCause::from_bits(raw);
        let kind = cause.decode();
        if cause.aliases() {
            warn!("{:?} aliased onto {} slot {}", cause, kind.table(), kind.index());
        }

        // On a single hart a held lock can only mean this trap interrupted a registration.
        let entry = match self.tables.try_lock() {
            Some(tables) => tables.table(kind.table()).slot(kind.index()).clone(),
            None => fatal::abort(self.host(), FatalError::TablesLocked { cause: raw }),
        };
        if entry.is_fallback() {
            error!("no handler for {:?} at epc {:#x}", cause, context.epc);
        } else {
            trace!("{:?} at epc {:#x}", cause, context.epc);
        }
        entry.invoke(context)
    }

    /// Runs `f` on the tables outside of dispatch. The global gate stays
    /// closed while they are held, so no interrupt can find them locked.
    /// `None` if they are already held.
    fn with_tables<R>(&self, f: impl FnOnce(&mut HandlerTables) -> R) -> Option<R> {
        let was_enabled = self.controller.disable_interrupts();
        let result = self.tables.try_lock().map(|mut tables| f(&mut tables));
        self.controller.restore_interrupts(was_enabled);
        result
    }

    /// Installs `entry` in slot `index` of the `kind` table, replacing what was there.
    pub fn register(&self, kind: TableKind, index: usize, entry: HandlerEntry) -> Result<(), TrapError> {
        self.with_tables(|tables| tables.register(kind, index, entry))
            .unwrap_or(Err(TrapError::TableBusy { table: kind }))
            .map_err(|err| {
                warn!("handler rejected: {}", err);
                err
            })
    }

    /// Registers an interrupt handler. `cause` may carry the interrupt bit.
    pub fn insert_interrupt_handler<F>(&self, cause: usize, handler: F) -> Result<(), TrapError>
    where
        F: Fn(&mut TrapContext) -> ResumeAddress + Send + Sync + 'static,
    {
        self.register(TableKind::Interrupt, cause & !INTERRUPT_BIT, HandlerEntry::registered(handler))
    }

    pub fn insert_exception_handler<F>(&self, cause: usize, handler: F) -> Result<(), TrapError>
    where
        F: Fn(&mut TrapContext) -> ResumeAddress + Send + Sync + 'static,
    {
        self.register(TableKind::Exception, cause, HandlerEntry::registered(handler))
    }

    /// False while another registration holds the tables.
    pub fn is_registered(&self, kind: TableKind, index: usize) -> bool {
        self.with_tables(|tables| tables.table(kind).is_registered(index))
            .unwrap_or(false)
    }

    /// Which table and slot a raw cause lands in.
    pub fn route(&self, cause: usize) -> TrapKind {
        TrapCause::from_bits(cause).decode()
    }

    pub fn controller(&self) -> &InterruptController {
        &self.controller
    }

    pub fn host(&self) -> &dyn HostChannel {
        &*self.host
    }
}
