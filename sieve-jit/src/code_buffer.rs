use std::io;
use std::ptr;

/// JIT code buffer backed by a single mmap'd page.
///
/// Follows W^X discipline: the buffer starts writable, and `finalize`
/// makes a one-way transition to executable. Unlike a general-purpose
/// TCG code cache, each `CodeBuffer` here holds exactly one compiled
/// mixer function, so a page is always enough room.
pub struct CodeBuffer {
    ptr: *mut u8,
    size: usize,
    offset: usize,
    executable: bool,
}

// SAFETY: CodeBuffer owns its mmap'd memory exclusively.
unsafe impl Send for CodeBuffer {}

impl CodeBuffer {
    /// Allocate a new code buffer of one page.
    pub fn new() -> io::Result<Self> {
        let size = page_size();
        assert!(size >= 4096, "unexpectedly small page size: {size}");

        // SAFETY: mmap with MAP_ANONYMOUS | MAP_PRIVATE, no file backing.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }

        Ok(Self {
            ptr: ptr as *mut u8,
            size,
            offset: 0,
            executable: false,
        })
    }

    /// Current write offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Remaining writable bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.size - self.offset
    }

    #[inline]
    pub fn emit_u8(&mut self, val: u8) {
        assert!(!self.executable, "cannot write to a finalized CodeBuffer");
        assert!(self.offset < self.size, "code buffer overflow");
        unsafe { self.ptr.add(self.offset).write(val) };
        self.offset += 1;
    }

    #[inline]
    pub fn emit_bytes(&mut self, data: &[u8]) {
        for &b in data {
            self.emit_u8(b);
        }
    }

    /// Get the generated code as a byte slice (up to the current offset).
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr..ptr+offset has been written.
        unsafe { std::slice::from_raw_parts(self.ptr, self.offset) }
    }

    /// Make the buffer executable and non-writable, returning the entry
    /// pointer (the start of the page, since nothing precedes the code).
    ///
    /// A one-way transition — the buffer cannot be written to afterward.
    pub fn finalize(&mut self) -> io::Result<*const u8> {
        if !self.executable {
            let ret = unsafe {
                libc::mprotect(
                    self.ptr as *mut libc::c_void,
                    self.size,
                    libc::PROT_READ | libc::PROT_EXEC,
                )
            };
            if ret != 0 {
                return Err(io::Error::last_os_error());
            }
            self.executable = true;
        }
        Ok(self.ptr as *const u8)
    }

    /// Release the mapped page. Idempotent — safe to call more than once,
    /// and called automatically by `Drop` if not called explicitly.
    pub fn free(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                libc::munmap(self.ptr as *mut libc::c_void, self.size);
            }
            self.ptr = ptr::null_mut();
        }
    }
}

impl Drop for CodeBuffer {
    fn drop(&mut self) {
        self.free();
    }
}

fn page_size() -> usize {
    // SAFETY: sysconf is always safe to call.
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize }
}
