//! UCI child-process delegate.

use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command as Process, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use chess_core::{Move, Position};
use tracing::{debug, info, trace, warn};

use crate::protocol::{Command, GoParams, Response};
use crate::{Delegate, DelegateError, SessionFault, SessionState};

/// Highest UCI `Skill Level` value.
pub const MAX_SKILL_LEVEL: u8 = 20;

/// Time a process gets to exit after `quit` before it is killed.
const QUIT_GRACE: Duration = Duration::from_millis(250);
const EXIT_POLL: Duration = Duration::from_millis(10);

/// How to launch and drive the delegate engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateSettings {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Sent as `Skill Level`, clamped to `0..=20`.
    pub skill_level: i32,
    pub depth: Option<u8>,
    pub movetime: Option<Duration>,
    pub handshake_timeout: Duration,
    pub move_timeout: Duration,
}

impl DelegateSettings {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            skill_level: MAX_SKILL_LEVEL as i32,
            depth: None,
            movetime: None,
            handshake_timeout: Duration::from_secs(5),
            move_timeout: Duration::from_secs(5),
        }
    }

    pub fn effective_skill_level(&self) -> u8 {
        self.skill_level.clamp(0, MAX_SKILL_LEVEL as i32) as u8
    }

    /// `go` parameters for a request. With no hint configured the engine is
    /// given half the move timeout.
    pub fn go_params(&self) -> GoParams {
        match (self.depth, self.movetime) {
            (None, None) => GoParams {
                depth: None,
                movetime: Some(self.move_timeout / 2),
            },
            (depth, movetime) => GoParams { depth, movetime },
        }
    }
}

/// A running engine process.
///
/// Dropping the session asks the engine to quit, then kills and reaps it if
/// it is still alive after a short grace period.
struct Session {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<io::Result<String>>,
    program: String,
}

impl Session {
    fn spawn(settings: &DelegateSettings) -> Result<Session, SessionFault> {
        let program = settings.program.display().to_string();
        let mut child = Process::new(&settings.program)
            .args(&settings.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SessionFault::Spawn {
                program: program.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            reap(&mut child);
            return Err(SessionFault::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "engine stdio was not captured",
            )));
        };

        let (tx, lines) = mpsc::channel();
        let reader = thread::Builder::new()
            .name("uci-delegate-reader".to_string())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    let failed = line.is_err();
                    if tx.send(line).is_err() || failed {
                        break;
                    }
                }
            });
        if let Err(e) = reader {
            reap(&mut child);
            return Err(SessionFault::Io(e));
        }

        debug!(%program, pid = child.id(), "delegate engine spawned");
        Ok(Session {
            child,
            stdin,
            lines,
            program,
        })
    }

    fn send(&mut self, cmd: &Command) -> Result<(), SessionFault> {
        trace!(program = %self.program, "> {cmd}");
        writeln!(self.stdin, "{cmd}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Reads lines until `accept` returns a value or `deadline` passes.
    fn wait_for<T>(
        &mut self,
        waiting_for: &'static str,
        deadline: Instant,
        after: Duration,
        mut accept: impl FnMut(Response) -> Option<T>,
    ) -> Result<T, SessionFault> {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(SessionFault::Timeout { waiting_for, after });
            }
            let line = match self.lines.recv_timeout(remaining) {
                Ok(line) => line?,
                Err(RecvTimeoutError::Timeout) => {
                    return Err(SessionFault::Timeout { waiting_for, after })
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(SessionFault::ProcessExited { waiting_for })
                }
            };
            trace!(program = %self.program, "< {line}");
            if let Some(found) = accept(Response::parse(&line)?) {
                return Ok(found);
            }
        }
    }

    /// Discards output left over from an earlier exchange.
    fn drain(&mut self) {
        while let Ok(line) = self.lines.try_recv() {
            if let Ok(line) = line {
                trace!(program = %self.program, "< (stale) {line}");
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if matches!(self.child.try_wait(), Ok(None)) {
            let _ = writeln!(self.stdin, "{}", Command::Quit);
            let _ = self.stdin.flush();

            let deadline = Instant::now() + QUIT_GRACE;
            while Instant::now() < deadline {
                if !matches!(self.child.try_wait(), Ok(None)) {
                    break;
                }
                thread::sleep(EXIT_POLL);
            }
        }
        reap(&mut self.child);
        debug!(program = %self.program, "delegate engine released");
    }
}

fn reap(child: &mut Child) {
    if matches!(child.try_wait(), Ok(None)) {
        let _ = child.kill();
    }
    let _ = child.wait();
}

/// [`Delegate`] backed by a UCI engine process.
pub struct UciDelegate {
    settings: DelegateSettings,
    state: SessionState,
    session: Option<Session>,
    engine_name: Option<String>,
}

impl UciDelegate {
    /// Creates an adapter without starting the process. The first request
    /// starts it.
    pub fn new(settings: DelegateSettings) -> Self {
        Self {
            settings,
            state: SessionState::Uninitialized,
            session: None,
            engine_name: None,
        }
    }

    pub fn settings(&self) -> &DelegateSettings {
        &self.settings
    }

    /// Name the engine reported during the handshake.
    pub fn engine_name(&self) -> Option<&str> {
        self.engine_name.as_deref()
    }

    /// Spawns the engine and runs the handshake.
    ///
    /// Does nothing when already `Ready`. Any failure leaves the adapter
    /// `Unavailable` for good.
    pub fn start(&mut self) -> Result<(), DelegateError> {
        match self.state {
            SessionState::Ready => return Ok(()),
            SessionState::Unavailable => return Err(DelegateError::Unavailable),
            SessionState::Uninitialized => {}
        }

        match self.handshake() {
            Ok(session) => {
                info!(
                    program = %session.program,
                    engine = self.engine_name.as_deref().unwrap_or("unknown"),
                    skill = self.settings.effective_skill_level(),
                    "delegate engine ready"
                );
                self.session = Some(session);
                self.state = SessionState::Ready;
                Ok(())
            }
            Err(fault) => {
                warn!(
                    program = %self.settings.program.display(),
                    error = %fault,
                    "delegate engine unavailable"
                );
                self.state = SessionState::Unavailable;
                Err(DelegateError::Unavailable)
            }
        }
    }

    fn handshake(&mut self) -> Result<Session, SessionFault> {
        let after = self.settings.handshake_timeout;
        let deadline = Instant::now() + after;
        let mut session = Session::spawn(&self.settings)?;

        session.send(&Command::Uci)?;
        let mut name = None;
        session.wait_for("uciok", deadline, after, |resp| match resp {
            Response::Name(n) => {
                name = Some(n);
                None
            }
            Response::UciOk => Some(()),
            _ => None,
        })?;
        self.engine_name = name;

        session.send(&Command::SetOption {
            name: "Skill Level".to_string(),
            value: self.settings.effective_skill_level().to_string(),
        })?;
        session.send(&Command::UciNewGame)?;
        session.send(&Command::IsReady)?;
        session.wait_for("readyok", deadline, after, |resp| {
            (resp == Response::ReadyOk).then_some(())
        })?;

        Ok(session)
    }

    fn exchange(
        session: &mut Session,
        pos: &Position,
        settings: &DelegateSettings,
    ) -> Result<Move, SessionFault> {
        session.drain();
        session.send(&Command::Position { fen: pos.to_fen() })?;
        session.send(&Command::Go(settings.go_params()))?;

        let after = settings.move_timeout;
        let deadline = Instant::now() + after;
        let best = session.wait_for("bestmove", deadline, after, |resp| match resp {
            Response::BestMove(mv) => Some(mv),
            _ => None,
        })?;
        best.ok_or(SessionFault::NoMove)
    }
}

impl Delegate for UciDelegate {
    fn state(&self) -> SessionState {
        self.state
    }

    fn request_move(&mut self, pos: &Position) -> Result<Move, DelegateError> {
        self.start()?;
        let Some(session) = self.session.as_mut() else {
            self.state = SessionState::Unavailable;
            return Err(DelegateError::Unavailable);
        };

        match Self::exchange(session, pos, &self.settings) {
            Ok(mv) => {
                debug!(%mv, "delegate engine answered");
                Ok(mv)
            }
            Err(fault) => {
                warn!(error = %fault, "delegate request failed, releasing engine");
                self.session = None;
                self.state = SessionState::Unavailable;
                Err(DelegateError::RequestFailed(fault))
            }
        }
    }

    fn shutdown(&mut self) {
        if self.session.take().is_some() {
            info!("delegate engine shut down");
        }
        self.state = SessionState::Unavailable;
    }
}

#[cfg(all(test, unix))]
#[path = "uci_process_tests.rs"]
mod uci_process_tests;
