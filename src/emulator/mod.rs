// Emulator module - owns and coordinates the CPU/PPU pair
//
// Wires the CPU bus, the PPU, and the shared NMI line together, loads ROM
// images, and drives the machine one scanline (or one frame) at a time.
//
// Time advancement follows the hardware ratio: each scanline step advances
// the PPU by one scanline and then runs the CPU until 113 cycles (1364 master
// clocks / 12) have elapsed. A frame is 262 such steps.

mod config;
mod recent_roms;
mod screenshot;
mod timer;

pub use config::{EmulatorConfig, ScreenshotConfig, VideoConfig};
pub use recent_roms::RecentRomsList;
pub use screenshot::{save_screenshot, ScreenshotError};
pub use timer::{HostTimer, IntervalTimer, TimerEvent};

use crate::bus::CpuBus;
use crate::cartridge::{InesHeader, RomError, RomImage};
use crate::cpu::Cpu;
use crate::display::{FrameBuffer, FrameSink};
use crate::ppu::{Ppu, PPU_WARMUP_CYCLES, SCANLINES_PER_FRAME};
use std::cell::{Ref, RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// CPU cycles consumed per scanline step (1364 master clocks / 12)
pub const CPU_CYCLES_PER_SCANLINE: u64 = 1364 / 12;

/// Main emulator structure
///
/// Owns the CPU, the CPU bus, and the PPU. The bus holds a shared handle to
/// the PPU's register window; the PPU holds a clone of the CPU's NMI line.
pub struct Emulator {
    /// CPU (6502 core)
    cpu: Cpu,

    /// CPU-visible memory bus
    bus: CpuBus,

    /// PPU, shared with the bus through the register-window capability
    ppu: Rc<RefCell<Ppu>>,

    /// Configuration
    config: EmulatorConfig,

    /// Header of the currently loaded ROM
    header: Option<InesHeader>,

    /// Path of the currently loaded ROM file
    rom_path: Option<PathBuf>,
}

impl Emulator {
    /// Create a new emulator with default configuration
    pub fn new() -> Self {
        Self::with_config(EmulatorConfig::default())
    }

    /// Create a new emulator with the given configuration
    pub fn with_config(config: EmulatorConfig) -> Self {
        let cpu = Cpu::new();
        let ppu = Rc::new(RefCell::new(Ppu::new()));
        ppu.borrow_mut().connect_nmi(cpu.nmi_line());

        let mut bus = CpuBus::new();
        bus.attach_ppu(ppu.clone());

        Emulator {
            cpu,
            bus,
            ppu,
            config,
            header: None,
            rom_path: None,
        }
    }

    /// Load a ROM image from a byte slice and reset the machine
    pub fn load_rom_bytes(&mut self, bytes: &[u8]) -> Result<(), RomError> {
        let rom = RomImage::parse(bytes)?;
        rom.load_into(&mut self.bus, &mut *self.ppu.borrow_mut())?;
        self.header = Some(rom.header);
        self.reset();
        Ok(())
    }

    /// Load a ROM file, recording it in the recent-ROMs list
    pub fn load_rom_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        self.load_rom_bytes(&bytes)?;
        self.rom_path = Some(path.to_path_buf());

        let mut recent = RecentRomsList::load_or_default();
        recent.add(path);
        if let Err(e) = recent.save() {
            log::warn!("failed to save recent ROM list: {}", e);
        }

        Ok(())
    }

    /// Reset the machine, as if pressing the console's reset button
    ///
    /// The CPU restarts from the reset vector and the PPU enters its warmup
    /// window: control register writes are dropped until 29,658 CPU cycles
    /// have passed.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        let mut ppu = self.ppu.borrow_mut();
        ppu.reset();
        ppu.begin_warmup();
    }

    /// Run one scanline step
    ///
    /// The PPU advances one scanline (rendering into the sink, possibly
    /// raising NMI), then the CPU runs until its share of the scanline's
    /// cycles has elapsed. The vblank transition is observable by CPU code in
    /// the same step because the NMI line is polled between instructions.
    pub fn step_scanline(&mut self, sink: &mut dyn FrameSink) {
        self.ppu.borrow_mut().step(sink);

        let target = self.cpu.cycles.wrapping_add(CPU_CYCLES_PER_SCANLINE);
        while self.cpu.cycles < target {
            self.cpu.step(&mut self.bus);
        }

        if !self.ppu.borrow().is_ready() && self.cpu.cycles >= PPU_WARMUP_CYCLES {
            self.ppu.borrow_mut().set_ready();
        }
    }

    /// Run one whole frame (262 scanline steps)
    pub fn run_frame(&mut self, sink: &mut dyn FrameSink) {
        for _ in 0..SCANLINES_PER_FRAME {
            self.step_scanline(sink);
        }
    }

    /// Drive the emulator from a host timer until it delivers a quit event
    ///
    /// An overrunning frame is logged but never re-entered; the next tick
    /// simply starts late.
    pub fn run(&mut self, sink: &mut dyn FrameSink, timer: &mut dyn HostTimer) {
        let frame_budget = Duration::from_secs_f64(1.0 / self.config.video.fps.max(1) as f64);

        loop {
            match timer.next_tick() {
                TimerEvent::Quit => break,
                TimerEvent::Tick => {
                    let start = Instant::now();
                    self.run_frame(sink);
                    let elapsed = start.elapsed();
                    if elapsed > frame_budget {
                        log::warn!(
                            "can't keep up! frame time is {:.1}ms",
                            elapsed.as_secs_f64() * 1000.0
                        );
                    }
                }
            }
        }
    }

    /// Save a screenshot of the given frame buffer
    pub fn screenshot(&self, frame: &FrameBuffer) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(
            frame.pixels(),
            self.rom_path.as_deref(),
            &self.config.screenshot,
        )
    }

    /// Header of the loaded ROM, if any
    pub fn header(&self) -> Option<&InesHeader> {
        self.header.as_ref()
    }

    /// The CPU state
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable CPU state (tests poke registers through this)
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The CPU bus
    pub fn bus(&self) -> &CpuBus {
        &self.bus
    }

    /// Mutable CPU bus
    pub fn bus_mut(&mut self) -> &mut CpuBus {
        &mut self.bus
    }

    /// The PPU state
    pub fn ppu(&self) -> Ref<'_, Ppu> {
        self.ppu.borrow()
    }

    /// Mutable PPU state
    pub fn ppu_mut(&mut self) -> RefMut<'_, Ppu> {
        self.ppu.borrow_mut()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
