// famicore - NES emulator core library
//
// A scanline-stepped emulator for the NES CPU/PPU pair (Ricoh 2A03 + 2C02),
// the memory maps that connect them, and the iNES ROM loader that seeds them.
// Host concerns (window, texture upload, frame pacing) plug in through the
// FrameSink and HostTimer capability traits.

// Public modules
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod ppu;

// Re-export main types for convenience
pub use bus::{CpuBus, PpuRegisters};
pub use cartridge::{ConsoleType, InesHeader, Mirroring, RomError, RomImage};
pub use cpu::{Cpu, InterruptLine};
pub use display::{FrameBuffer, FrameSink, NullSink, NES_PALETTE};
pub use emulator::{Emulator, EmulatorConfig, HostTimer, IntervalTimer, TimerEvent};
pub use ppu::{Ppu, PpuBus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // Test that all core components can be instantiated
        let _cpu = Cpu::new();
        let _ppu = Ppu::new();
        let _bus = CpuBus::new();
        let _frame = FrameBuffer::new();
        let _emulator = Emulator::new();
    }
}
