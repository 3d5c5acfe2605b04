use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current time in the format YYYY-MM-DD HH:MM:SS TZ
#[cfg(target_family = "unix")]
pub fn now() -> String {
    strftime_local("%Y-%m-%d %H:%M:%S %Z")
}

/// Returns the current time as YYYYmmdd_HHMMSS, safe for filenames
#[cfg(target_family = "unix")]
pub fn filename_timestamp() -> String {
    strftime_local("%Y%m%d_%H%M%S")
}

#[cfg(target_family = "unix")]
fn strftime_local(format: &str) -> String {
    use std::ffi::{CStr, CString};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards");
    let secs = now.as_secs() as libc::time_t;

    let mut tm: libc::tm = unsafe { std::mem::zeroed() };

    unsafe {
        libc::localtime_r(&secs, &mut tm);
    }

    let mut buf = [0 as libc::c_char; 100];
    let fmt = match CString::new(format) {
        Ok(fmt) => fmt,
        Err(_) => return String::new(),
    };

    unsafe {
        libc::strftime(buf.as_mut_ptr(), buf.len(), fmt.as_ptr(), &tm);
        let c_str = CStr::from_ptr(buf.as_ptr());

        c_str.to_string_lossy().to_string()
    }
}

/// Returns the current time in the format YYYY-MM-DD HH:MM:SS
#[cfg(target_family = "windows")]
pub fn now() -> String {
    let tm = local_time();
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        tm.wYear, tm.wMonth, tm.wDay, tm.wHour, tm.wMinute, tm.wSecond
    )
}

/// Returns the current time as YYYYmmdd_HHMMSS, safe for filenames
#[cfg(target_family = "windows")]
pub fn filename_timestamp() -> String {
    let tm = local_time();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        tm.wYear, tm.wMonth, tm.wDay, tm.wHour, tm.wMinute, tm.wSecond
    )
}

#[cfg(target_family = "windows")]
fn local_time() -> windows_sys::Win32::Foundation::SYSTEMTIME {
    let mut tm: windows_sys::Win32::Foundation::SYSTEMTIME = unsafe { std::mem::zeroed() };
    unsafe {
        windows_sys::Win32::System::SystemInformation::GetLocalTime(&mut tm);
    }
    tm
}
