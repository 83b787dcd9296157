// bellatrix_rt/src/trap/infrastructure/handler_table.rs

//! # Handler Tables
//!
//! Two fixed arrays of `TABLE_SIZE` entries, one per trap class. Slots are
//! filled with the default handler on construction and only ever replaced,
//! never emptied.

use super::fatal::default_handler;
use crate::config::{INDEX_MASK, TABLE_SIZE};
use crate::trap::ds::{HandlerEntry, TableKind, TrapError};
use crate::util::htif::HostChannel;
use alloc::sync::Arc;

pub struct HandlerTable {
    slots: [HandlerEntry; TABLE_SIZE],
}

impl HandlerTable {
    pub fn new(host: &Arc<dyn HostChannel>) -> Self {
        Self {
            slots: core::array::from_fn(|_| default_handler(Arc::clone(host))),
        }
    }

    /// Replaces slot `index`. Out-of-range indices leave the table untouched.
    pub fn insert(&mut self, index: usize, entry: HandlerEntry) -> Result<(), usize> {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(index),
        }
    }

    /// The slot for `index`, reduced modulo the table size.
    pub fn slot(&self, index: usize) -> &HandlerEntry {
        &self.slots[index & INDEX_MASK]
    }

    pub fn is_registered(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|entry| !entry.is_fallback())
    }
}

/// Exception and interrupt tables, locked together.
pub struct HandlerTables {
    exceptions: HandlerTable,
    interrupts: HandlerTable,
}

impl HandlerTables {
    pub fn new(host: &Arc<dyn HostChannel>) -> Self {
        Self {
            exceptions: HandlerTable::new(host),
            interrupts: HandlerTable::new(host),
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut HandlerTable {
        match kind {
            TableKind::Exception => &mut self.exceptions,
            TableKind::Interrupt => &mut self.interrupts,
        }
    }

    pub fn table(&self, kind: TableKind) -> &HandlerTable {
        match kind {
            TableKind::Exception => &self.exceptions,
            TableKind::Interrupt => &self.interrupts,
        }
    }

    pub fn register(&mut self, kind: TableKind, index: usize, entry: HandlerEntry) -> Result<(), TrapError> {
        self.table_mut(kind)
            .insert(index, entry)
            .map_err(|index| TrapError::RegistrationOutOfRange { table: kind, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trap::ds::TrapContext;

    struct NullHost;

    impl HostChannel for NullHost {
        fn exit(&self, status: isize) -> ! {
            panic!("exit({})", status)
        }

        fn write(&self, _fd: usize, _bytes: &[u8]) {}
    }

    fn tables() -> HandlerTables {
        let host: Arc<dyn HostChannel> = Arc::new(NullHost);
        HandlerTables::new(&host)
    }

    #[test]
    fn test_every_slot_starts_with_default() {
        let tables = tables();
        for index in 0..TABLE_SIZE {
            assert!(!tables.table(TableKind::Exception).is_registered(index));
            assert!(!tables.table(TableKind::Interrupt).is_registered(index));
        }
    }

    #[test]
    fn test_insert_replaces_only_target_slot() {
        let mut tables = tables();
        tables
            .register(TableKind::Interrupt, 7, HandlerEntry::registered(|ctx: &mut TrapContext| ctx.epc))
            .unwrap();
        assert!(tables.table(TableKind::Interrupt).is_registered(7));
        assert!(!tables.table(TableKind::Exception).is_registered(7));
        assert!(!tables.table(TableKind::Interrupt).is_registered(6));
    }

    #[test]
    fn test_out_of_range_insert_is_rejected() {
        let mut tables = tables();
        let err = tables
            .register(TableKind::Exception, TABLE_SIZE, HandlerEntry::registered(|ctx: &mut TrapContext| ctx.epc))
            .unwrap_err();
        assert_eq!(err, TrapError::RegistrationOutOfRange { table: TableKind::Exception, index: TABLE_SIZE });
        assert!(!tables.table(TableKind::Exception).is_registered(TABLE_SIZE));
    }
}
