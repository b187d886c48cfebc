//! Windows spooler binding (Win32 API)

use crate::error::{SpoolError, SpoolResult};
use crate::model::{PrinterDetails, RawPrinter};
use crate::status::{PrinterAttributes, PrinterStatus};
use crate::system::{EnumerationScope, PrintVerb, PrinterHandle, PrinterSystem};
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use tracing::{debug, instrument};
use windows::Win32::Graphics::Printing::{
    ClosePrinter, EnumPrintersW, GetDefaultPrinterW, GetPrinterW, OpenPrinterW,
    PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_ENUM_NETWORK, PRINTER_HANDLE,
    PRINTER_INFO_2W, PRINTER_INFO_5W, SetDefaultPrinterW,
};
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::SW_HIDE;
use windows::core::{PCWSTR, PWSTR};

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn path_to_wide(path: &Path) -> Vec<u16> {
    path.as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

/// Read a spooler-owned string, empty if null or not valid UTF-16
fn read_pwstr(p: PWSTR) -> String {
    if p.is_null() {
        return String::new();
    }
    unsafe { p.to_string().unwrap_or_default() }
}

/// Windows print spooler
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsSpooler;

impl WindowsSpooler {
    pub fn new() -> Self {
        Self
    }
}

/// Open printer handle, closed on drop
#[derive(Debug)]
pub struct WindowsPrinterHandle {
    handle: PRINTER_HANDLE,
    name: String,
}

impl Drop for WindowsPrinterHandle {
    fn drop(&mut self) {
        unsafe {
            if ClosePrinter(self.handle).is_err() {
                debug!(printer = %self.name, "ClosePrinter failed");
            }
        }
    }
}

impl PrinterHandle for WindowsPrinterHandle {
    fn details(&self) -> SpoolResult<PrinterDetails> {
        unsafe {
            let mut needed: u32 = 0;
            let probe = GetPrinterW(self.handle, 2, None, &mut needed);

            if needed == 0 {
                return Err(match probe {
                    Err(e) => SpoolError::spooler("GetPrinter", e),
                    Ok(()) => SpoolError::spooler("GetPrinter", "no printer information returned"),
                });
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            GetPrinterW(self.handle, 2, Some(buf.as_mut_slice()), &mut needed)
                .map_err(|e| SpoolError::spooler("GetPrinter", e))?;

            // The buffer is only byte-aligned
            let info = std::ptr::read_unaligned(buf.as_ptr() as *const PRINTER_INFO_2W);

            // Strings point into `buf`, read them before it drops
            Ok(PrinterDetails {
                status: PrinterStatus(info.Status),
                attributes: PrinterAttributes(info.Attributes),
                location: read_pwstr(info.pLocation),
                server_name: read_pwstr(info.pServerName),
                port_name: read_pwstr(info.pPortName),
                driver_name: read_pwstr(info.pDriverName),
                comment: read_pwstr(info.pComment),
                jobs: info.cJobs,
            })
        }
    }
}

impl PrinterSystem for WindowsSpooler {
    type Handle = WindowsPrinterHandle;

    #[instrument(skip(self))]
    fn enumerate(&self, scope: EnumerationScope) -> SpoolResult<Vec<RawPrinter>> {
        let mut flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
        if scope.include_network {
            flags |= PRINTER_ENUM_NETWORK;
        }

        unsafe {
            let mut needed: u32 = 0;
            let mut returned: u32 = 0;

            // Sizing call fails with ERROR_INSUFFICIENT_BUFFER whenever there
            // is something to return; a failure with nothing needed is real.
            let probe = EnumPrintersW(flags, None, 5, None, &mut needed, &mut returned);
            if needed == 0 {
                return match probe {
                    Ok(()) => Ok(Vec::new()),
                    Err(e) => Err(SpoolError::spooler("EnumPrinters", e)),
                };
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            EnumPrintersW(
                flags,
                None,
                5,
                Some(buf.as_mut_slice()),
                &mut needed,
                &mut returned,
            )
            .map_err(|e| SpoolError::spooler("EnumPrinters", e))?;

            let base = buf.as_ptr() as *const PRINTER_INFO_5W;
            let mut result = Vec::with_capacity(returned as usize);
            for i in 0..returned as usize {
                let info = std::ptr::read_unaligned(base.add(i));
                if info.pPrinterName.is_null() {
                    continue;
                }
                result.push(RawPrinter {
                    name: read_pwstr(info.pPrinterName),
                    port_name: read_pwstr(info.pPortName),
                    attributes: PrinterAttributes(info.Attributes),
                });
            }

            debug!(count = result.len(), "EnumPrinters returned");
            Ok(result)
        }
    }

    fn default_printer(&self) -> SpoolResult<Option<String>> {
        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);

            if needed == 0 {
                return Ok(None);
            }

            let mut buf: Vec<u16> = vec![0; needed as usize];
            let ok = GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed);

            if !ok.as_bool() {
                return Ok(None);
            }

            let name = PWSTR(buf.as_mut_ptr())
                .to_string()
                .map_err(|e| SpoolError::spooler("GetDefaultPrinter", e))?;

            Ok(Some(name))
        }
    }

    #[instrument(skip(self))]
    fn set_default_printer(&self, name: &str) -> SpoolResult<()> {
        let name_w = to_wide(name);
        unsafe {
            let ok = SetDefaultPrinterW(PCWSTR::from_raw(name_w.as_ptr()));
            if !ok.as_bool() {
                return Err(SpoolError::spooler(
                    "SetDefaultPrinter",
                    std::io::Error::last_os_error(),
                ));
            }
        }
        Ok(())
    }

    fn open_printer(&self, name: &str) -> SpoolResult<WindowsPrinterHandle> {
        let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
        let name_w = to_wide(name);

        unsafe {
            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|e| SpoolError::spooler("OpenPrinter", e))?;
        }

        Ok(WindowsPrinterHandle {
            handle,
            name: name.to_string(),
        })
    }

    #[instrument(skip(self))]
    fn shell_print(&self, file: &Path, verb: &PrintVerb) -> SpoolResult<()> {
        let verb_w = to_wide(verb.as_str());
        let file_w = path_to_wide(file);
        let params_w = verb.parameters().map(|p| to_wide(&p));
        let params = params_w
            .as_ref()
            .map(|p| PCWSTR::from_raw(p.as_ptr()))
            .unwrap_or_else(PCWSTR::null);

        let dir_w = file.parent().map(path_to_wide);
        let dir = dir_w
            .as_ref()
            .map(|d| PCWSTR::from_raw(d.as_ptr()))
            .unwrap_or_else(PCWSTR::null);

        let code = unsafe {
            ShellExecuteW(
                None,
                PCWSTR::from_raw(verb_w.as_ptr()),
                PCWSTR::from_raw(file_w.as_ptr()),
                params,
                dir,
                SW_HIDE,
            )
        }
        .0 as isize;

        // Values above 32 mean success
        if code <= 32 {
            return Err(SpoolError::spooler(
                "ShellExecute",
                shell_error_message(code),
            ));
        }

        Ok(())
    }
}

/// Text for the legacy ShellExecute return codes
fn shell_error_message(code: isize) -> String {
    let reason = match code {
        0 => "out of memory or resources",
        2 => "file not found",
        3 => "path not found",
        5 => "access denied",
        8 => "out of memory",
        26 => "sharing violation",
        27 => "file association incomplete",
        28 | 29 | 30 => "DDE transaction failed",
        31 => "no application is associated with this file type for the requested verb",
        32 => "DLL not found",
        _ => "unknown error",
    };
    format!("{} (code {})", reason, code)
}
