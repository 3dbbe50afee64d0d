//! speakpad main entry point
//!
//! The panel's main loop monitors two sources:
//! 1. stdin (user keyboard input) - panel commands and typed text
//! 2. the scheduler - voice list retry while the host warms up
//!
//! Host notifications (utterance begin/end, voice changes) are drained
//! every iteration.

use log::{debug, error, info};
use mio::{Events, Interest, Poll, Token};
use nix::libc;
use speakpad::input::{create_default_keymap, DefaultKeyHandler, HandlerAction};
use speakpad::panel::{config::Config, Panel};
use speakpad::platform::is_wsl;
use speakpad::speech::{backends::null::NullHost, create_host, SpeechHost};
use speakpad::terminal::{restore_termios, set_raw_mode};
use speakpad::Result;
use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, RawFd};
use std::process;

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to speakpad.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("speakpad.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open speakpad.log for debug logging: {}",
                    e
                );
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "speakpad version {} starting (debug mode, logging to speakpad.log)",
            speakpad::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    // Run the application
    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    debug!("Initializing speakpad");

    // Verify stdin is a TTY
    let stdin_fd = io::stdin().as_raw_fd();
    if unsafe { libc::isatty(stdin_fd) } == 0 {
        eprintln!("Error: speakpad requires an interactive terminal (stdin is not a TTY)");
        eprintln!("Usage: Run speakpad directly in a terminal, not through pipes or redirects");
        process::exit(1);
    }

    // Bind the speech host before touching the terminal so an unsupported
    // environment can show a normal blocking alert
    let host: Box<dyn SpeechHost> = match create_host() {
        Ok(host) => host,
        Err(e) => {
            alert_unsupported(&e)?;
            Box::new(NullHost::new())
        }
    };

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let mut panel = Panel::new(config, host);

    // Raw mode lets the panel capture all keystrokes including arrows
    let original_termios = set_raw_mode(stdin_fd)?;

    // Ensure we restore terminal on exit
    let _guard = TermiosGuard {
        fd: stdin_fd,
        termios: original_termios,
    };

    // Create default key handler for panel commands
    let keymap = create_default_keymap();
    info!("Key handler initialized with {} bindings", keymap.len());
    let mut default_handler = DefaultKeyHandler::new(keymap);

    // WSL doesn't support epoll on TTY file descriptors, so use select() instead
    let use_select = is_wsl();

    // Set up event loop infrastructure based on platform
    let mut mio_poll = if !use_select {
        debug!("Using mio::Poll for event loop");
        let poll = Poll::new()?;

        // Register stdin for reading
        let mut stdin_source = mio::unix::SourceFd(&stdin_fd);
        poll.registry()
            .register(&mut stdin_source, STDIN, Interest::READABLE)?;

        Some((poll, Events::with_capacity(128)))
    } else {
        debug!("Using select() for event loop (WSL mode)");
        None
    };

    panel.print_controls()?;
    panel.subscribe_voices()?;

    info!("speakpad ready - entering event loop");

    // Main event loop
    loop {
        // Run any scheduled tasks that are ready (voice list retry)
        if let Err(e) = panel.run_scheduled() {
            error!("Error running scheduled task: {}", e);
        }

        // Drain host notifications
        if let Err(e) = panel.pump_host_events() {
            error!("Error pumping host events: {}", e);
        }

        if use_select {
            // WSL mode: Use select() for I/O monitoring
            use nix::sys::select::{select, FdSet};
            use nix::sys::time::{TimeVal, TimeValLike};
            use std::os::unix::io::BorrowedFd;

            // Create borrowed FD for select (must be created each iteration)
            let stdin_borrowed = unsafe { BorrowedFd::borrow_raw(stdin_fd) };

            // Rebuild FdSet each iteration (select() modifies it)
            let mut read_fds = FdSet::new();
            read_fds.insert(stdin_borrowed);

            // Calculate timeout based on scheduled tasks or use default
            let mut timeout = if let Some(delay) = panel.time_until_next_scheduled() {
                let ms = delay.as_millis().min(100) as i64;
                TimeVal::milliseconds(ms)
            } else {
                // No scheduled tasks, 100ms default so host events drain promptly
                TimeVal::milliseconds(100)
            };

            match select(None, Some(&mut read_fds), None, None, Some(&mut timeout)) {
                Ok(_n) => {
                    if read_fds.contains(stdin_borrowed) {
                        match handle_stdin(&mut panel, &mut default_handler) {
                            Ok(true) => {}
                            Ok(false) => return Ok(()),
                            Err(e) => {
                                error!("stdin error: {}", e);
                                return Ok(());
                            }
                        }
                    }
                }
                Err(nix::errno::Errno::EINTR) => {
                    debug!("select() interrupted by signal");
                }
                Err(e) => {
                    error!("select() error: {:?}", e);
                    return Err(speakpad::SpeakpadError::Io(io::Error::from_raw_os_error(
                        e as i32,
                    )));
                }
            }
        } else if let Some((ref mut poll, ref mut events)) = mio_poll {
            // Regular mode: Use mio for I/O monitoring
            let timeout = panel
                .time_until_next_scheduled()
                .map(|d| d.min(std::time::Duration::from_millis(100)))
                .or(Some(std::time::Duration::from_millis(100)));

            poll.poll(events, timeout)?;

            for event in events.iter() {
                if event.token() == STDIN {
                    match handle_stdin(&mut panel, &mut default_handler) {
                        Ok(true) => {}
                        Ok(false) => return Ok(()),
                        Err(e) => {
                            error!("stdin error: {}", e);
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

/// Handle user input from stdin
///
/// Modal handlers (typed rate/pitch entry) see the key first; otherwise
/// panel bindings apply, and unrecognized printable input is typed into
/// the text field. Returns false when the user quit.
fn handle_stdin(panel: &mut Panel, default_handler: &mut DefaultKeyHandler) -> Result<bool> {
    let mut buf = [0u8; 4096];

    let n = io::stdin().read(&mut buf)?;
    if n == 0 {
        return Ok(true);
    }

    let input = &buf[..n];

    // Process through handler stack if there are modal handlers active
    if !panel.handlers.is_empty() {
        // Temporarily pop the handler to avoid borrow checker issues
        if let Some(mut handler) = panel.handlers.pop() {
            let action = handler.process(input, panel)?;

            match action {
                HandlerAction::Passthrough => {
                    // Push handler back (it wants to stay active)
                    panel.handlers.push(handler);
                    panel.type_text(&String::from_utf8_lossy(input))?;
                }
                HandlerAction::Remove => {
                    // Handler removed itself, don't push back
                }
                HandlerAction::Handled => {
                    // Push handler back (it wants to stay active)
                    panel.handlers.push(handler);
                }
                HandlerAction::Quit => {
                    return Ok(false);
                }
            }
        }
        return Ok(true);
    }

    // No modal handlers - process with the panel bindings
    let action = default_handler.process_key(input, panel)?;

    match action {
        HandlerAction::Passthrough => {
            // Not a panel command - type it into the text field
            panel.type_text(&String::from_utf8_lossy(input))?;
        }
        HandlerAction::Handled => {
            // Panel command was executed
        }
        HandlerAction::Remove => {
            // This shouldn't happen for the default handler
        }
        HandlerAction::Quit => {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Blocking alert for environments without a usable speech engine
///
/// Printed before raw mode is entered, so a plain line read works for
/// the dismissal. The program continues with an inert host afterwards.
fn alert_unsupported(err: &speakpad::SpeakpadError) -> Result<()> {
    println!();
    println!("==============================================================");
    println!(" Speech synthesis is not available in this environment.");
    println!(" ({})", err);
    println!();
    println!(" The panel will start anyway, but nothing will be spoken.");
    println!("==============================================================");
    println!(" Press Enter to continue.");

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}

/// RAII guard to restore terminal on exit
///
/// Ensures the terminal is always returned to normal mode even if the
/// panel crashes
struct TermiosGuard {
    fd: RawFd,
    termios: libc::termios,
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        restore_termios(self.fd, &self.termios);
        debug!("Terminal attributes restored");
    }
}
