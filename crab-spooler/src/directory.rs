//! Printer directory service
//!
//! Turns raw spooler entries into normalized [`PrinterRecord`]s:
//! - virtual printers are dropped
//! - each remaining printer is resolved through a scoped handle
//! - a failing printer degrades to a basic record instead of failing the list
//! - results are sorted default-first, then by name

use crate::classifier::VirtualPrinterFilter;
use crate::error::{SpoolError, SpoolResult};
use crate::model::{EnumerationResult, PrinterDetails, PrinterRecord, RawPrinter, sort_printers};
use crate::system::{EnumerationScope, PrinterHandle, PrinterSystem};
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

/// Directory service over an injected [`PrinterSystem`]
#[derive(Debug)]
pub struct PrinterDirectory<S> {
    system: S,
    filter: VirtualPrinterFilter,
    scope: EnumerationScope,
}

impl<S: PrinterSystem> PrinterDirectory<S> {
    /// Create a directory with the built-in virtual printer list
    pub fn new(system: S) -> Self {
        Self {
            system,
            filter: VirtualPrinterFilter::default(),
            scope: EnumerationScope::default(),
        }
    }

    pub fn with_filter(mut self, filter: VirtualPrinterFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_scope(mut self, scope: EnumerationScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn filter(&self) -> &VirtualPrinterFilter {
        &self.filter
    }

    /// Enumerate physical printers.
    ///
    /// Only a failure of the registry query itself yields `success = false`.
    #[instrument(skip(self), fields(network = self.scope.include_network))]
    pub fn list(&self) -> EnumerationResult {
        let raw = match self.system.enumerate(self.scope) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Printer enumeration failed");
                return EnumerationResult::failure(e.to_string());
            }
        };

        let mut seen = HashSet::new();
        let mut printers = Vec::with_capacity(raw.len());
        for entry in &raw {
            if self.filter.is_virtual(entry) {
                debug!(printer = %entry.name, port = %entry.port_name, "Skipping virtual printer");
                continue;
            }
            if !seen.insert(entry.name.as_str()) {
                debug!(printer = %entry.name, "Skipping duplicate registry entry");
                continue;
            }
            printers.push(self.resolve(entry));
        }

        sort_printers(&mut printers);

        let degraded = printers.iter().filter(|p| p.is_degraded()).count();
        info!(
            total = raw.len(),
            listed = printers.len(),
            degraded,
            "Printers enumerated"
        );

        EnumerationResult::success(printers)
    }

    /// Make `name` the OS default printer. No retries.
    #[instrument(skip(self))]
    pub fn set_default(&self, name: &str) -> SpoolResult<()> {
        if name.trim().is_empty() {
            return Err(SpoolError::InvalidInput(
                "printer name must not be empty".to_string(),
            ));
        }

        self.system.set_default_printer(name).map_err(|e| {
            warn!(error = %e, "Failed to set default printer");
            e
        })?;

        info!("Default printer changed");
        Ok(())
    }

    /// Build the record for one non-virtual entry, degrading on failure
    fn resolve(&self, raw: &RawPrinter) -> PrinterRecord {
        let is_default = self.is_default(&raw.name);

        match self.lookup_details(&raw.name) {
            Ok(details) => PrinterRecord::resolved(raw, is_default, details),
            Err(e) => {
                warn!(printer = %raw.name, error = %e, "Printer detail lookup failed, listing degraded record");
                PrinterRecord::degraded(&raw.name, is_default, e.to_string())
            }
        }
    }

    /// Open, query, release. The handle drops on every exit path.
    fn lookup_details(&self, name: &str) -> SpoolResult<PrinterDetails> {
        let handle = self.system.open_printer(name)?;
        handle.details()
    }

    /// Compare against the current OS default (queried per call, not cached)
    fn is_default(&self, name: &str) -> bool {
        match self.system.default_printer() {
            Ok(Some(default)) => default == name,
            Ok(None) => false,
            Err(e) => {
                debug!(error = %e, "Default printer lookup failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySpooler;
    use crate::model::UNKNOWN_STATUS;
    use crate::status::{
        PRINTER_ATTRIBUTE_NETWORK, PRINTER_STATUS_OFFLINE, PRINTER_STATUS_POWER_SAVE,
        PrinterAttributes, PrinterStatus,
    };

    fn details(status: u32) -> PrinterDetails {
        PrinterDetails {
            status: PrinterStatus(status),
            ..Default::default()
        }
    }

    fn office() -> MemorySpooler {
        MemorySpooler::new()
            .with_printer("Office Laser", details(0))
            .with_printer("Microsoft Print to PDF", details(0))
            .with_printer("back room inkjet", details(PRINTER_STATUS_OFFLINE))
            .with_printer(
                "Annex Copier",
                PrinterDetails {
                    status: PrinterStatus(PRINTER_STATUS_POWER_SAVE),
                    attributes: PrinterAttributes(PRINTER_ATTRIBUTE_NETWORK),
                    location: "Annex".to_string(),
                    server_name: "\\\\print01".to_string(),
                    ..Default::default()
                },
            )
            .with_default("Office Laser")
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let directory = PrinterDirectory::new(office());
        let result = directory.list();

        assert!(result.success);
        assert!(result.error.is_none());
        let names: Vec<_> = result.printers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Office Laser", "Annex Copier", "back room inkjet"]);
    }

    #[test]
    fn test_list_decodes_status() {
        let directory = PrinterDirectory::new(office());
        let result = directory.list();

        let annex = result.find("Annex Copier").unwrap();
        assert!(annex.is_ready);
        assert!(annex.is_network);
        assert_eq!(annex.location, "Annex");
        assert_eq!(annex.server_name, "\\\\print01");

        let inkjet = result.find("back room inkjet").unwrap();
        assert!(!inkjet.is_ready);
        assert_eq!(inkjet.status, i64::from(PRINTER_STATUS_OFFLINE));
    }

    #[test]
    fn test_enumeration_failure_is_top_level() {
        let spooler = office().failing_enumeration("The RPC server is unavailable.");
        let result = PrinterDirectory::new(spooler).list();

        assert!(!result.success);
        assert!(result.printers.is_empty());
        assert!(result.error.unwrap().contains("RPC server is unavailable"));
        assert!(result.timestamp > 0);
    }

    #[test]
    fn test_detail_failure_degrades_single_record() {
        let spooler = office().with_broken_printer("Broken Driver", "GetPrinter failed: driver crashed");
        let directory = PrinterDirectory::new(spooler);
        let result = directory.list();

        assert!(result.success);
        assert_eq!(result.printers.len(), 4);

        let broken = result.find("Broken Driver").unwrap();
        assert_eq!(broken.status, UNKNOWN_STATUS);
        assert!(!broken.is_ready);
        assert!(!broken.is_network);
        assert!(broken.error.as_deref().unwrap().contains("driver crashed"));

        let office = result.find("Office Laser").unwrap();
        assert!(office.is_ready);
        assert!(office.error.is_none());
    }

    #[test]
    fn test_handles_released_on_every_path() {
        let spooler = office()
            .with_broken_printer("Broken Driver", "query failed")
            .with_unopenable_printer("Locked", "Access is denied.");
        let directory = PrinterDirectory::new(spooler);
        let result = directory.list();

        assert_eq!(result.printers.len(), 5);
        assert_eq!(directory.system().open_handles(), 0);
        assert_eq!(directory.system().handles_opened(), 4);
    }

    #[test]
    fn test_virtual_default_marks_nothing() {
        let spooler = office().with_default("Microsoft Print to PDF");
        let result = PrinterDirectory::new(spooler).list();

        assert!(result.success);
        assert!(result.printers.iter().all(|p| !p.is_default));
    }

    #[test]
    fn test_duplicate_entries_listed_once() {
        let spooler = office().with_printer("Office Laser", details(0));
        let result = PrinterDirectory::new(spooler).list();

        let count = result
            .printers
            .iter()
            .filter(|p| p.name == "Office Laser")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_custom_filter() {
        let filter = VirtualPrinterFilter::default().with_fragments(["annex"]);
        let result = PrinterDirectory::new(office()).with_filter(filter).list();

        assert!(result.find("Annex Copier").is_none());
        assert_eq!(result.printers.len(), 2);
    }

    #[test]
    fn test_set_default_round_trip() {
        let directory = PrinterDirectory::new(office());
        directory.set_default("back room inkjet").unwrap();

        let result = directory.list();
        let defaults: Vec<_> = result.printers.iter().filter(|p| p.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, "back room inkjet");
        assert_eq!(result.printers[0].name, "back room inkjet");
    }

    #[test]
    fn test_set_default_unknown_printer() {
        let directory = PrinterDirectory::new(office());
        let err = directory.set_default("Nope").unwrap_err();

        assert!(matches!(err, SpoolError::Spooler { .. }));
        assert_eq!(
            directory.system().default_printer().unwrap().as_deref(),
            Some("Office Laser")
        );
    }

    #[test]
    fn test_set_default_empty_name() {
        let directory = PrinterDirectory::new(office());
        let err = directory.set_default("  ").unwrap_err();
        assert!(matches!(err, SpoolError::InvalidInput(_)));
    }
}
