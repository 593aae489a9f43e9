//! The cell processor: register file, state machine, and instruction set.

use crate::cell::Cell;
use crate::clock::{TimeSeed, TimeSource, WallClock};
use crate::fault::Fault;
use crate::frame::Frame;
use crate::rule30;
use crate::state::{Register, RunState};
use crate::vector::{Vector, CENTER_POSITION, VECTOR_CELLS};

/// A single-threaded cell processor instance.
///
/// The processor exclusively owns its nine vector registers and its frame
/// stack; independent bit streams need independent processors. Every
/// operation is gated on the explicit run state: the 128-generation
/// extraction loop runs to completion or the fault that stopped it is
/// latched, after which all operations return that fault. There is no
/// cancellation and no resumable partial progress.
pub struct Processor {
    a: Vector,
    b: Vector,
    c: Vector,
    d: Vector,
    psi: Vector,
    r30: Vector,
    sdr30: Vector,
    sdtime: Vector,
    r: Vector,
    stack: Frame,
    run_state: RunState,
    counter_mode: bool,
    cyclic: u32,
    clock: Box<dyn TimeSource>,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// Creates a processor on the system wall clock, reset and idle.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(WallClock))
    }

    /// Creates a processor on a caller-supplied time source.
    #[must_use]
    pub fn with_clock(clock: Box<dyn TimeSource>) -> Self {
        let mut cp = Self {
            a: Vector::new(),
            b: Vector::new(),
            c: Vector::new(),
            d: Vector::new(),
            psi: Vector::new(),
            r30: Vector::new(),
            sdr30: Vector::new(),
            sdtime: Vector::new(),
            r: Vector::new(),
            stack: Frame::new(),
            run_state: RunState::Uninitialized,
            counter_mode: false,
            cyclic: 0,
            clock,
        };
        // Infallible from Uninitialized.
        let _ = cp.reset();
        cp
    }

    /// Current run state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Returns `true` in deterministic (seed-replayable) mode.
    #[must_use]
    pub const fn counter_mode(&self) -> bool {
        self.counter_mode
    }

    /// Selects deterministic (`true`) or free-running (`false`) mode.
    pub const fn set_counter_mode(&mut self, on: bool) {
        self.counter_mode = on;
    }

    /// Read access to a register.
    #[must_use]
    pub const fn register(&self, reg: Register) -> &Vector {
        match reg {
            Register::A => &self.a,
            Register::B => &self.b,
            Register::C => &self.c,
            Register::D => &self.d,
            Register::Psi => &self.psi,
            Register::R30 => &self.r30,
            Register::SdR30 => &self.sdr30,
            Register::SdTime => &self.sdtime,
            Register::R => &self.r,
        }
    }

    /// Loads a register by copy, leaving `value` with the caller.
    ///
    /// # Errors
    ///
    /// Returns the latched fault on a halted processor, or
    /// [`Fault::NotIdle`] (latching it) when the machine is busy.
    pub fn load(&mut self, reg: Register, value: &Vector) -> Result<(), Fault> {
        self.ensure_idle("load")?;
        let dst = match reg {
            Register::A => &mut self.a,
            Register::B => &mut self.b,
            Register::C => &mut self.c,
            Register::D => &mut self.d,
            Register::Psi => &mut self.psi,
            Register::R30 => &mut self.r30,
            Register::SdR30 => &mut self.sdr30,
            Register::SdTime => &mut self.sdtime,
            Register::R => &mut self.r,
        };
        dst.copy_from(value);
        Ok(())
    }

    /// Nullifies every register (zero-setting the continuation seed),
    /// clears the stack, drops counter mode, and becomes idle.
    ///
    /// The cyclic sample counter is deliberately not reset; it stays
    /// monotonic for the processor's lifetime.
    ///
    /// # Errors
    ///
    /// Returns the latched fault on a halted processor; a halted machine
    /// is never restarted.
    pub fn reset(&mut self) -> Result<(), Fault> {
        if let Some(fault) = self.run_state.latched_fault() {
            return Err(fault);
        }
        self.counter_mode = false;
        self.stack.clear();
        self.a.set_null();
        self.b.set_null();
        self.c.set_null();
        self.d.set_null();
        self.psi.set_null();
        self.r30.set_null();
        self.r.set_null();
        self.sdtime.set_null();
        self.sdr30.set_zero();
        self.run_state = RunState::Idle;
        Ok(())
    }

    /// Samples a fresh [`TimeSeed`], bumping the cyclic counter so two
    /// samples in the same clock instant still differ.
    pub fn sample_seed(&mut self) -> TimeSeed {
        self.cyclic = self.cyclic.wrapping_add(1);
        let reading = self.clock.now();
        TimeSeed {
            long_count: reading.seconds,
            short_count: reading.subseconds,
            cyclic: self.cyclic,
        }
    }

    /// Clock self-test: samples twice and faults if the samples are
    /// bit-identical, which would mean the seed pipeline has collapsed to
    /// a constant.
    ///
    /// # Errors
    ///
    /// Returns (and latches) [`Fault::ClockStuck`] on identical samples.
    pub fn check_clocks(&mut self) -> Result<(), Fault> {
        let s0 = self.sample_seed();
        let s1 = self.sample_seed();
        if s0 == s1 {
            return Err(self.halt(Fault::ClockStuck));
        }
        Ok(())
    }

    /// `XOR` instruction: `D = A XOR B`.
    ///
    /// # Errors
    ///
    /// Faults with [`Fault::NullOperand`] if either operand register holds
    /// any `Null` cell; a never-initialized bit must not leak into output.
    pub fn xor_ab(&mut self) -> Result<(), Fault> {
        self.ensure_idle("xor_ab")?;
        if self.a.has_null() {
            return Err(self.halt(Fault::NullOperand {
                register: Register::A,
            }));
        }
        if self.b.has_null() {
            return Err(self.halt(Fault::NullOperand {
                register: Register::B,
            }));
        }
        self.d = self.a.xor(&self.b);
        Ok(())
    }

    /// The central extraction instruction: runs Rule 30 for 128
    /// generations from the seed in `SDR30`, sampling the center column.
    ///
    /// The seed is consumed from `SDR30` into row `A`; row `B` is the
    /// double buffer (odd generations read `A` and write `B`). An
    /// all-`False` seed gets a single `True` at the center position first,
    /// since the zero row is a fixed point of Rule 30. Each generation's
    /// new center cell lands in `D` at position = generation. Afterwards
    /// the last fully-read row becomes the new `SDR30` (so the next call
    /// continues the automaton instead of restarting it) and `D` moves to
    /// `R30`.
    ///
    /// # Errors
    ///
    /// Faults when the processor is not idle or `SDR30` holds any `Null`
    /// cell.
    pub fn advance_r30(&mut self) -> Result<(), Fault> {
        self.ensure_idle("advance_r30")?;
        if self.sdr30.has_null() {
            return Err(self.halt(Fault::NullOperand {
                register: Register::SdR30,
            }));
        }

        self.a.take_from(&mut self.sdr30);
        self.b.set_null();
        self.run_state = RunState::Running;

        if self.a.is_zero() {
            self.a
                .set(CENTER_POSITION, Cell::True)
                .map_err(|fault| self.halt(fault))?;
        }

        for gen in 1..=VECTOR_CELLS {
            let (current, next) = if gen & 0x01 == 1 {
                (&self.a, &mut self.b)
            } else {
                (&self.b, &mut self.a)
            };
            rule30::evolve(current, next);
            let center = next.get(CENTER_POSITION);
            let center = center.map_err(|fault| self.halt(fault))?;
            self.d
                .set(gen, center)
                .map_err(|fault| self.halt(fault))?;
        }

        // Generation 128 read row B; that row is the continuation seed.
        self.sdr30.take_from(&mut self.b);
        self.r30.take_from(&mut self.d);
        self.run_state = RunState::Idle;
        Ok(())
    }

    /// Refreshes `SDTIME`: pre-fills from the previous output `R` (zeros
    /// before the first output), then overlays `long_count` at positions
    /// 1..=32, `cyclic` at 49..=80, and `short_count` at 97..=128. The
    /// clock bits are guessable; the 32 carried-over bits at 33..=48 and
    /// 81..=96 are not.
    ///
    /// # Errors
    ///
    /// Returns the latched fault on a halted processor or a state
    /// violation fault when the machine is busy.
    pub fn inc_sdtime(&mut self) -> Result<(), Fault> {
        self.ensure_idle("inc_sdtime")?;
        let seed = self.sample_seed();

        if self.r.has_null() {
            self.sdtime.set_zero();
        } else {
            self.sdtime.copy_from(&self.r);
        }

        for (n, byte) in (1..=4_u8).zip(seed.long_count.to_le_bytes()) {
            let set = self.sdtime.set_byte(n, byte);
            set.map_err(|fault| self.halt(fault))?;
        }
        for (n, byte) in (7..=10_u8).zip(seed.cyclic.to_le_bytes()) {
            let set = self.sdtime.set_byte(n, byte);
            set.map_err(|fault| self.halt(fault))?;
        }
        for (n, byte) in (13..=16_u8).zip(seed.short_count.to_le_bytes()) {
            let set = self.sdtime.set_byte(n, byte);
            set.map_err(|fault| self.halt(fault))?;
        }
        Ok(())
    }

    /// Two-round diffusion (`SHA30` — this machine's internal mixing step,
    /// not a published hash): seeds the automaton from `A` (consuming it),
    /// advances twice discarding the first block, then lands the final
    /// continuation row in `D` — copied in counter mode so the seed
    /// survives, moved (consuming `SDR30`) when free-running.
    ///
    /// # Errors
    ///
    /// Propagates extraction faults; requires an idle processor and a
    /// fully defined `A`.
    pub fn sha30(&mut self) -> Result<(), Fault> {
        self.ensure_idle("sha30")?;
        self.d.set_null();
        self.sdr30.take_from(&mut self.a);
        self.advance_r30()?;
        self.advance_r30()?;
        if self.counter_mode {
            self.d.copy_from(&self.sdr30);
        } else {
            self.d.take_from(&mut self.sdr30);
        }
        Ok(())
    }

    /// Rebuilds the `PSI` fingerprint: `SHA30` of `SDR30` (counter mode)
    /// or `SDTIME` (free-running), result moved into `PSI`.
    ///
    /// # Errors
    ///
    /// Propagates mixing faults.
    pub fn inc_psi(&mut self) -> Result<(), Fault> {
        self.ensure_idle("inc_psi")?;
        self.psi.set_null();
        if self.counter_mode {
            self.a.copy_from(&self.sdr30);
        } else {
            self.a.copy_from(&self.sdtime);
        }
        self.sha30()?;
        self.psi.take_from(&mut self.d);
        Ok(())
    }

    /// Non-deterministic combination: `R = PSI XOR SHA30(PSI)`. Recovering
    /// the mixing input from `R` alone requires inverting the mixing step.
    /// `PSI` must already hold a fully defined fingerprint.
    ///
    /// # Errors
    ///
    /// Propagates mixing faults; faults on a `Null`-bearing `PSI`.
    pub fn gen_r(&mut self) -> Result<(), Fault> {
        self.ensure_idle("gen_r")?;
        self.r.set_null();
        self.a.copy_from(&self.psi);
        self.sha30()?;
        self.a.copy_from(&self.psi);
        self.b.copy_from(&self.d);
        self.xor_ab()?;
        self.r.take_from(&mut self.d);
        Ok(())
    }

    /// One time quantum: the top-level tick external callers drive.
    ///
    /// Refreshes `SDTIME` unless in counter mode, advances the automaton
    /// by one 128-bit block, and copies the new continuation seed into the
    /// output register `R`. The refreshed `SDTIME` is not wired into
    /// `SDR30`: the active seed is whatever the caller loaded there, which
    /// is how the deterministic entry points replay a stream.
    ///
    /// # Errors
    ///
    /// Propagates extraction faults; requires an idle processor.
    pub fn time_quantum(&mut self) -> Result<(), Fault> {
        self.ensure_idle("time_quantum")?;
        if !self.counter_mode {
            self.inc_sdtime()?;
        }
        self.advance_r30()?;
        self.r.copy_from(&self.sdr30);
        Ok(())
    }

    /// Pushes the seed bundle (`SDTIME`, then `SDR30`) onto the stack,
    /// nulling both registers.
    ///
    /// # Errors
    ///
    /// Faults with [`Fault::StackOverflow`] past capacity.
    pub fn push_seed(&mut self) -> Result<(), Fault> {
        self.ensure_idle("push_seed")?;
        let pushed = self.stack.push(&mut self.sdtime);
        pushed.map_err(|fault| self.halt(fault))?;
        let pushed = self.stack.push(&mut self.sdr30);
        pushed.map_err(|fault| self.halt(fault))?;
        Ok(())
    }

    /// Pops the seed bundle, undoing [`Self::push_seed`] (`SDR30` first).
    ///
    /// # Errors
    ///
    /// Returns the latched fault on a halted processor or a state
    /// violation fault when the machine is busy.
    pub fn pop_seed(&mut self) -> Result<(), Fault> {
        self.ensure_idle("pop_seed")?;
        self.stack.pop(&mut self.sdr30);
        self.stack.pop(&mut self.sdtime);
        Ok(())
    }

    /// Pushes the general-purpose bundle (`A`, `B`, `C`, then `D`) onto
    /// the stack, nulling all four registers.
    ///
    /// # Errors
    ///
    /// Faults with [`Fault::StackOverflow`] past capacity.
    pub fn push_gp(&mut self) -> Result<(), Fault> {
        self.ensure_idle("push_gp")?;
        let pushed = self.stack.push(&mut self.a);
        pushed.map_err(|fault| self.halt(fault))?;
        let pushed = self.stack.push(&mut self.b);
        pushed.map_err(|fault| self.halt(fault))?;
        let pushed = self.stack.push(&mut self.c);
        pushed.map_err(|fault| self.halt(fault))?;
        let pushed = self.stack.push(&mut self.d);
        pushed.map_err(|fault| self.halt(fault))?;
        Ok(())
    }

    /// Pops the general-purpose bundle, undoing [`Self::push_gp`]
    /// (`D` first).
    ///
    /// # Errors
    ///
    /// Returns the latched fault on a halted processor or a state
    /// violation fault when the machine is busy.
    pub fn pop_gp(&mut self) -> Result<(), Fault> {
        self.ensure_idle("pop_gp")?;
        self.stack.pop(&mut self.d);
        self.stack.pop(&mut self.c);
        self.stack.pop(&mut self.b);
        self.stack.pop(&mut self.a);
        Ok(())
    }

    /// Number of occupied frame-stack slots.
    #[must_use]
    pub const fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    fn ensure_idle(&mut self, op: &'static str) -> Result<(), Fault> {
        match self.run_state {
            RunState::Idle => Ok(()),
            RunState::Halted(fault) => Err(fault),
            RunState::Uninitialized | RunState::Running => Err(self.halt(Fault::NotIdle { op })),
        }
    }

    /// Latches the first fault; later faults do not overwrite it.
    fn halt(&mut self, fault: Fault) -> Fault {
        if let Some(first) = self.run_state.latched_fault() {
            return first;
        }
        self.run_state = RunState::Halted(fault);
        fault
    }
}
