// Cartridge module - iNES ROM image parsing and NROM loading
//
// Parses an iNES-format byte blob into a typed header plus borrowed PRG/CHR
// views, and seeds the CPU and PPU buses with the mapper-0 (NROM) layout.
//
// # iNES Layout
//
// ```text
// 16-byte header:  "NES\x1A", PRG size (16KB units), CHR size (8KB units),
//                  flag6, flag7, 8 bytes padding
// 512 bytes:       trainer (only if flag6 bit 2 is set)
// prg_16k * 16384: PRG-ROM
// chr_8k * 8192:   CHR-ROM (0 units means the cartridge carries CHR-RAM)
// ```

use crate::bus::CpuBus;
use crate::ppu::Ppu;

/// Magic string at the start of every iNES file
pub const INES_MAGIC: [u8; 4] = *b"NES\x1a";

/// Size of the iNES header in bytes
pub const INES_HEADER_SIZE: usize = 16;

/// Size of the optional trainer block
pub const TRAINER_SIZE: usize = 512;

/// Nametable mirroring wired by the cartridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// Logical nametables 0/1 share one bank, 2/3 the other
    Horizontal,
    /// Logical nametables 0/2 share one bank, 1/3 the other
    Vertical,
    /// Cartridge provides its own VRAM; treated as vertical here
    FourScreen,
}

/// Console type encoded in flag7 bits 0-1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleType {
    /// Standard NES / Famicom
    Nes,
    /// Nintendo VS. System
    Vs,
    /// PlayChoice-10
    Playchoice10,
}

/// Errors produced while parsing or loading a ROM image
#[derive(Debug)]
pub enum RomError {
    /// The file does not start with "NES\x1A"
    BadMagic,
    /// The file ended before the declared PRG/CHR/trainer data
    Truncated,
    /// The cartridge uses a mapper this core does not implement
    UnsupportedMapper(u8),
    /// PRG-ROM is neither 16KB nor 32KB, which NROM requires
    BadPrgSize(usize),
}

impl std::fmt::Display for RomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RomError::BadMagic => write!(f, "bad iNES header magic"),
            RomError::Truncated => write!(f, "unexpected end of ROM image"),
            RomError::UnsupportedMapper(id) => write!(f, "mapper {} is not supported", id),
            RomError::BadPrgSize(size) => {
                write!(f, "bad PRG-ROM size: {} bytes (expected 16KB or 32KB)", size)
            }
        }
    }
}

impl std::error::Error for RomError {}

/// Interpreted iNES header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InesHeader {
    /// PRG-ROM size in bytes
    pub prg_size: usize,
    /// CHR-ROM size in bytes (0 means CHR-RAM)
    pub chr_size: usize,
    /// Mapper number from the flag6/flag7 nibbles
    pub mapper_id: u8,
    /// Nametable mirroring mode
    pub mirror_mode: Mirroring,
    /// Cartridge has battery-backed RAM
    pub has_battery: bool,
    /// A 512-byte trainer precedes PRG-ROM
    pub has_trainer: bool,
    /// Console type from flag7
    pub console_type: ConsoleType,
    /// File declares the NES 2.0 extension
    pub is_nes2: bool,
}

/// A parsed ROM image borrowing PRG/CHR views from the source bytes
pub struct RomImage<'a> {
    /// Interpreted header fields
    pub header: InesHeader,
    /// Trainer block, if present
    pub trainer: Option<&'a [u8]>,
    /// PRG-ROM data
    pub prg: &'a [u8],
    /// CHR-ROM data (empty for CHR-RAM cartridges)
    pub chr: &'a [u8],
}

impl<'a> RomImage<'a> {
    /// Parse an iNES byte blob
    ///
    /// Validates the magic and the declared block sizes. Trailing bytes past
    /// the declared PRG/CHR blocks are logged but not fatal.
    ///
    /// # Errors
    ///
    /// Returns `RomError::BadMagic` for a wrong magic string and
    /// `RomError::Truncated` if the file ends inside a declared block.
    pub fn parse(data: &'a [u8]) -> Result<RomImage<'a>, RomError> {
        if data.len() < INES_HEADER_SIZE {
            return Err(RomError::Truncated);
        }
        if data[0..4] != INES_MAGIC {
            return Err(RomError::BadMagic);
        }

        let prg_size = data[4] as usize * 16 * 1024;
        let chr_size = data[5] as usize * 8 * 1024;
        let flag6 = data[6];
        let flag7 = data[7];

        let mapper_id = (flag6 >> 4) | (flag7 & 0xF0);
        let has_battery = (flag6 & 0x02) != 0;
        let has_trainer = (flag6 & 0x04) != 0;
        let four_screen = (flag6 & 0x08) != 0;
        let mirror_mode = if four_screen {
            Mirroring::FourScreen
        } else if (flag6 & 0x01) != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let console_type = match flag7 & 0x03 {
            1 => ConsoleType::Vs,
            2 => ConsoleType::Playchoice10,
            _ => ConsoleType::Nes,
        };
        let is_nes2 = (flag7 & 0x04) != 0;

        let mut offset = INES_HEADER_SIZE;

        let trainer = if has_trainer {
            if data.len() < offset + TRAINER_SIZE {
                return Err(RomError::Truncated);
            }
            let block = &data[offset..offset + TRAINER_SIZE];
            offset += TRAINER_SIZE;
            Some(block)
        } else {
            None
        };

        if data.len() < offset + prg_size {
            return Err(RomError::Truncated);
        }
        let prg = &data[offset..offset + prg_size];
        offset += prg_size;

        if data.len() < offset + chr_size {
            return Err(RomError::Truncated);
        }
        let chr = &data[offset..offset + chr_size];
        offset += chr_size;

        if offset != data.len() {
            log::warn!(
                "ROM image has {} trailing bytes past the declared PRG/CHR blocks",
                data.len() - offset
            );
        }

        Ok(RomImage {
            header: InesHeader {
                prg_size,
                chr_size,
                mapper_id,
                mirror_mode,
                has_battery,
                has_trainer,
                console_type,
                is_nes2,
            },
            trainer,
            prg,
            chr,
        })
    }

    /// Load the image into the CPU and PPU buses (mapper 0 only)
    ///
    /// A 16KB PRG image lands at $8000 and mirrors at $C000; a 32KB image
    /// fills $8000-$FFFF. CHR-ROM is copied to PPU $0000-$1FFF, and the PPU
    /// nametable mirroring is taken from the header.
    ///
    /// # Errors
    ///
    /// Returns `RomError::UnsupportedMapper` for anything but NROM, and
    /// `RomError::BadPrgSize` if the PRG block is not 16KB or 32KB.
    pub fn load_into(&self, bus: &mut CpuBus, ppu: &mut Ppu) -> Result<(), RomError> {
        if self.header.mapper_id != 0 {
            return Err(RomError::UnsupportedMapper(self.header.mapper_id));
        }

        match self.prg.len() {
            0x4000 | 0x8000 => bus.load_prg(self.prg),
            other => return Err(RomError::BadPrgSize(other)),
        }

        // chr_8k == 0 means the cartridge carries CHR-RAM; the pattern tables
        // stay writable and zeroed in that case.
        if !self.chr.is_empty() {
            ppu.bus_mut().load_chr(self.chr);
        }
        ppu.bus_mut().set_mirroring(self.header.mirror_mode);

        log::debug!("prg_size: {} bytes", self.header.prg_size);
        log::debug!("chr_size: {} bytes", self.header.chr_size);
        log::debug!("mapper: {}", self.header.mapper_id);
        log::debug!("mirroring: {:?}", self.header.mirror_mode);
        log::debug!("has_battery: {}", self.header.has_battery);
        log::debug!("has_trainer: {}", self.header.has_trainer);
        log::debug!("console_type: {:?}", self.header.console_type);
        log::debug!("nes2.0: {}", self.header.is_nes2);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an iNES blob with the given geometry and fill bytes
    fn build_rom(prg_16k: u8, chr_8k: u8, flag6: u8, flag7: u8) -> Vec<u8> {
        let mut rom = Vec::new();
        rom.extend_from_slice(&INES_MAGIC);
        rom.push(prg_16k);
        rom.push(chr_8k);
        rom.push(flag6);
        rom.push(flag7);
        rom.extend_from_slice(&[0; 8]);
        if flag6 & 0x04 != 0 {
            rom.extend_from_slice(&[0xEE; TRAINER_SIZE]);
        }
        rom.extend_from_slice(&vec![0xAA; prg_16k as usize * 16 * 1024]);
        rom.extend_from_slice(&vec![0xBB; chr_8k as usize * 8 * 1024]);
        rom
    }

    #[test]
    fn test_parse_minimal_rom() {
        let data = build_rom(1, 1, 0x00, 0x00);
        let rom = RomImage::parse(&data).unwrap();

        assert_eq!(rom.header.prg_size, 16 * 1024);
        assert_eq!(rom.header.chr_size, 8 * 1024);
        assert_eq!(rom.header.mapper_id, 0);
        assert_eq!(rom.header.mirror_mode, Mirroring::Horizontal);
        assert!(!rom.header.has_battery);
        assert!(!rom.header.has_trainer);
        assert_eq!(rom.header.console_type, ConsoleType::Nes);
        assert!(!rom.header.is_nes2);
        assert_eq!(rom.prg.len(), 16 * 1024);
        assert_eq!(rom.chr.len(), 8 * 1024);
        assert!(rom.trainer.is_none());
    }

    #[test]
    fn test_parse_bad_magic() {
        let mut data = build_rom(1, 1, 0x00, 0x00);
        data[0] = b'X';
        assert!(matches!(RomImage::parse(&data), Err(RomError::BadMagic)));
    }

    #[test]
    fn test_parse_truncated_header() {
        assert!(matches!(
            RomImage::parse(b"NES\x1a\x01"),
            Err(RomError::Truncated)
        ));
    }

    #[test]
    fn test_parse_truncated_prg() {
        let mut data = build_rom(2, 0, 0x00, 0x00);
        data.truncate(INES_HEADER_SIZE + 100);
        assert!(matches!(RomImage::parse(&data), Err(RomError::Truncated)));
    }

    #[test]
    fn test_parse_trainer() {
        let data = build_rom(1, 1, 0x04, 0x00);
        let rom = RomImage::parse(&data).unwrap();
        assert!(rom.header.has_trainer);
        let trainer = rom.trainer.unwrap();
        assert_eq!(trainer.len(), TRAINER_SIZE);
        assert!(trainer.iter().all(|&b| b == 0xEE));
        assert_eq!(rom.prg[0], 0xAA, "PRG must start after the trainer");
    }

    #[test]
    fn test_parse_mirroring_and_flags() {
        let rom_v = build_rom(1, 1, 0x01, 0x00);
        assert_eq!(
            RomImage::parse(&rom_v).unwrap().header.mirror_mode,
            Mirroring::Vertical
        );

        let rom_fs = build_rom(1, 1, 0x09, 0x00);
        assert_eq!(
            RomImage::parse(&rom_fs).unwrap().header.mirror_mode,
            Mirroring::FourScreen,
            "Four-screen bit overrides the mirror bit"
        );

        let rom_bat = build_rom(1, 1, 0x02, 0x00);
        assert!(RomImage::parse(&rom_bat).unwrap().header.has_battery);

        let rom_nes2 = build_rom(1, 1, 0x00, 0x05);
        let header = RomImage::parse(&rom_nes2).unwrap().header;
        assert!(header.is_nes2);
        assert_eq!(header.console_type, ConsoleType::Vs);
    }

    #[test]
    fn test_parse_mapper_nibbles() {
        // Mapper 0x42: low nibble in flag6 high bits, high nibble in flag7
        let data = build_rom(1, 1, 0x20, 0x40);
        let rom = RomImage::parse(&data).unwrap();
        assert_eq!(rom.header.mapper_id, 0x42);
    }

    #[test]
    fn test_parse_chr_ram() {
        let data = build_rom(1, 0, 0x00, 0x00);
        let rom = RomImage::parse(&data).unwrap();
        assert_eq!(rom.header.chr_size, 0);
        assert!(rom.chr.is_empty());
    }

    #[test]
    fn test_load_into_rejects_unsupported_mapper() {
        let data = build_rom(1, 1, 0x10, 0x00);
        let rom = RomImage::parse(&data).unwrap();
        let mut bus = CpuBus::new();
        let mut ppu = Ppu::new();
        assert!(matches!(
            rom.load_into(&mut bus, &mut ppu),
            Err(RomError::UnsupportedMapper(1))
        ));
    }

    #[test]
    fn test_load_into_mirrors_16kb_prg() {
        let data = build_rom(1, 1, 0x00, 0x00);
        let rom = RomImage::parse(&data).unwrap();
        let mut bus = CpuBus::new();
        let mut ppu = Ppu::new();
        rom.load_into(&mut bus, &mut ppu).unwrap();

        assert_eq!(bus.read(0x8000), 0xAA);
        assert_eq!(bus.read(0xC000), 0xAA, "16KB PRG mirrors at $C000");
        assert_eq!(ppu.bus().read(0x0000), 0xBB, "CHR copied to pattern table");
        assert_eq!(ppu.bus().read(0x1FFF), 0xBB);
    }

    #[test]
    fn test_load_into_sets_mirroring() {
        let data = build_rom(1, 1, 0x01, 0x00);
        let rom = RomImage::parse(&data).unwrap();
        let mut bus = CpuBus::new();
        let mut ppu = Ppu::new();
        rom.load_into(&mut bus, &mut ppu).unwrap();
        assert_eq!(ppu.bus().mirroring(), Mirroring::Vertical);
    }
}
