//! Privilege check
//!
//! Fail closed: anything short of a positive answer is "not elevated", so a
//! privileged operation is denied rather than attempted on a false positive.
//! Never panics.

/// True when the current process runs with administrative rights.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    // Effective uid, not real uid: setuid re-execution counts.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    false
}
