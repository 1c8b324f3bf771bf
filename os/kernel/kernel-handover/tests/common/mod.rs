#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::sync::Once;

use kernel_memory_addresses::{LowAddress, MapMemory, MappedAddress, translate};
use log::{LevelFilter, Log, Metadata, Record};

/// A region of leaked test memory, reachable at `base`.
struct Region {
    base: u64,
    ptr: *mut u8,
    len: usize,
}

/// `MapMemory` over leaked buffers, keyed by mapped address.
///
/// Every call is recorded so tests can assert which memory was touched.
/// Mapping outside a registered region panics, like a page fault would.
#[derive(Default)]
pub struct FakeMemory {
    regions: RefCell<Vec<Region>>,
    maps: RefCell<Vec<(MappedAddress, usize)>>,
    calls: Cell<usize>,
}

impl FakeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, base: u64, bytes: Vec<u8>) -> *mut u8 {
        let leaked: &'static mut [u8] = Box::leak(bytes.into_boxed_slice());
        let ptr = leaked.as_mut_ptr();
        self.regions.borrow_mut().push(Region {
            base,
            ptr,
            len: leaked.len(),
        });
        ptr
    }

    /// Place the payload blob in memory and return its kernel address.
    pub fn insert_payload(&self, blob: Vec<u8>) -> MappedAddress {
        let len = blob.len();
        let leaked: &'static mut [u8] = Box::leak(blob.into_boxed_slice());
        let addr = MappedAddress::from_ptr(leaked.as_ptr());
        self.regions.borrow_mut().push(Region {
            base: addr.as_u64(),
            ptr: leaked.as_mut_ptr(),
            len,
        });
        addr
    }

    /// Place `bytes` where a record pointing at `low` expects them.
    pub fn insert_low(&self, low: LowAddress, bytes: Vec<u8>) {
        self.insert(translate(low).as_u64(), bytes);
    }

    /// Copy of the bytes currently at `low`.
    pub fn read_low(&self, low: LowAddress, len: usize) -> Vec<u8> {
        let slice = self.lookup(translate(low), len);
        unsafe { std::slice::from_raw_parts(slice, len) }.to_vec()
    }

    /// Number of `map_ro`/`map_rw` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Every mapping requested so far, in order.
    pub fn maps(&self) -> Vec<(MappedAddress, usize)> {
        self.maps.borrow().clone()
    }

    fn lookup(&self, addr: MappedAddress, len: usize) -> *mut u8 {
        let addr = addr.as_u64();
        self.regions
            .borrow()
            .iter()
            .find_map(|r| {
                let off = addr.checked_sub(r.base)?;
                let off = usize::try_from(off).ok()?;
                (off.checked_add(len)? <= r.len).then(|| unsafe { r.ptr.add(off) })
            })
            .unwrap_or_else(|| panic!("unmapped access at {addr:#x} (+{len:#x})"))
    }

    fn record(&self, addr: MappedAddress, len: usize) -> *mut u8 {
        self.calls.set(self.calls.get() + 1);
        self.maps.borrow_mut().push((addr, len));
        self.lookup(addr, len)
    }
}

impl MapMemory for FakeMemory {
    unsafe fn map_ro<'a>(&self, addr: MappedAddress, len: usize) -> &'a [u8] {
        let ptr = self.record(addr, len);
        unsafe { std::slice::from_raw_parts(ptr, len) }
    }

    unsafe fn map_rw<'a>(&self, addr: MappedAddress, len: usize) -> &'a mut [u8] {
        let ptr = self.record(addr, len);
        unsafe { std::slice::from_raw_parts_mut(ptr, len) }
    }
}

thread_local! {
    static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Records every log line of the current thread.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format!("[{}] {}", record.level(), record.args());
        LINES.with(|lines| lines.borrow_mut().push(line));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Install the capturing logger and forget earlier lines of this thread.
pub fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    LINES.with(|lines| lines.borrow_mut().clear());
}

/// Lines logged on this thread since [`capture_logs`].
pub fn logged() -> Vec<String> {
    LINES.with(|lines| lines.borrow().clone())
}

/// An uncompressed 32-bit truecolor TGA with the given RGBA pixels.
pub fn tga(width: u16, height: u16, pixels: &[[u8; 4]]) -> Vec<u8> {
    assert_eq!(pixels.len(), usize::from(width) * usize::from(height));
    let mut file = vec![0u8; 18];
    file[2] = 2;
    file[12..14].copy_from_slice(&width.to_le_bytes());
    file[14..16].copy_from_slice(&height.to_le_bytes());
    file[16] = 32;
    file[17] = 0x28;
    for pixel in pixels {
        file.extend_from_slice(pixel);
    }
    file
}
