//! Terminal mode handling
//!
//! The panel reads keys byte-by-byte, so stdin runs in raw mode for the
//! whole session and is restored on exit.

use crate::Result;
use nix::libc;
use std::os::unix::io::RawFd;

/// Set raw mode on a terminal file descriptor
///
/// Raw mode is required to capture individual keypresses including
/// control characters and escape sequences. Returns the original
/// attributes for later restoration.
pub fn set_raw_mode(fd: RawFd) -> Result<libc::termios> {
    let original_termios = unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut termios) != 0 {
            return Err(crate::SpeakpadError::Terminal(
                "tcgetattr failed on stdin".to_string(),
            ));
        }
        termios
    };

    let mut raw_termios = original_termios;

    unsafe {
        libc::cfmakeraw(&mut raw_termios);
        libc::tcsetattr(fd, libc::TCSANOW, &raw_termios);
    }

    Ok(original_termios)
}

/// Restore terminal attributes
///
/// Called on exit to return the terminal to normal line-buffered mode
pub fn restore_termios(fd: RawFd, termios: &libc::termios) {
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, termios);
    }
}
