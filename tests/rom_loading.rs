// ROM loading through the emulator: header interpretation, NROM mapping,
// CHR seeding, and loader error surfacing.

mod common;

use common::build_ines;
use famicore::{ConsoleType, Emulator, Mirroring, RomError};

#[test]
fn test_load_seeds_reset_vector_from_prg() {
    let mut prg = vec![0u8; 16 * 1024];
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;
    let rom = build_ines(&prg, &[0u8; 8192], 0x00, 0x00);

    let mut emulator = Emulator::new();
    emulator.load_rom_bytes(&rom).unwrap();

    assert_eq!(emulator.cpu().pc, 0x8000, "PC loaded from the reset vector");
}

#[test]
fn test_16kb_prg_is_mirrored() {
    let mut prg = vec![0u8; 16 * 1024];
    prg[0x0000] = 0xAB;
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;
    let rom = build_ines(&prg, &[0u8; 8192], 0x00, 0x00);

    let mut emulator = Emulator::new();
    emulator.load_rom_bytes(&rom).unwrap();

    assert_eq!(emulator.bus().read(0x8000), 0xAB);
    assert_eq!(emulator.bus().read(0xC000), 0xAB, "NROM-128 mirror");
}

#[test]
fn test_32kb_prg_is_flat() {
    let mut prg = vec![0u8; 32 * 1024];
    prg[0x0000] = 0x11;
    prg[0x4000] = 0x22;
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    let rom = build_ines(&prg, &[0u8; 8192], 0x00, 0x00);

    let mut emulator = Emulator::new();
    emulator.load_rom_bytes(&rom).unwrap();

    assert_eq!(emulator.bus().read(0x8000), 0x11);
    assert_eq!(emulator.bus().read(0xC000), 0x22);
}

#[test]
fn test_chr_copied_into_pattern_tables() {
    let mut prg = vec![0u8; 16 * 1024];
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;
    let mut chr = vec![0u8; 8192];
    chr[0x0000] = 0xDE;
    chr[0x1FFF] = 0xAD;
    let rom = build_ines(&prg, &chr, 0x00, 0x00);

    let mut emulator = Emulator::new();
    emulator.load_rom_bytes(&rom).unwrap();

    let ppu = emulator.ppu();
    assert_eq!(ppu.bus().read(0x0000), 0xDE);
    assert_eq!(ppu.bus().read(0x1FFF), 0xAD);
}

#[test]
fn test_header_metadata_exposed() {
    let prg = vec![0u8; 16 * 1024];
    let rom = build_ines(&prg, &[0u8; 8192], 0x03, 0x00); // vertical + battery

    let mut emulator = Emulator::new();
    emulator.load_rom_bytes(&rom).unwrap();

    let header = emulator.header().unwrap();
    assert_eq!(header.prg_size, 16 * 1024);
    assert_eq!(header.chr_size, 8192);
    assert_eq!(header.mirror_mode, Mirroring::Vertical);
    assert!(header.has_battery);
    assert_eq!(header.console_type, ConsoleType::Nes);

    let ppu = emulator.ppu();
    assert_eq!(ppu.bus().mirroring(), Mirroring::Vertical);
}

#[test]
fn test_bad_magic_is_fatal() {
    let mut rom = build_ines(&vec![0u8; 16 * 1024], &[0u8; 8192], 0x00, 0x00);
    rom[0] = b'X';

    let mut emulator = Emulator::new();
    assert!(matches!(
        emulator.load_rom_bytes(&rom),
        Err(RomError::BadMagic)
    ));
}

#[test]
fn test_truncated_image_is_fatal() {
    let mut rom = build_ines(&vec![0u8; 16 * 1024], &[0u8; 8192], 0x00, 0x00);
    rom.truncate(rom.len() - 1024);

    let mut emulator = Emulator::new();
    assert!(matches!(
        emulator.load_rom_bytes(&rom),
        Err(RomError::Truncated)
    ));
}

#[test]
fn test_unsupported_mapper_is_fatal() {
    // Mapper 4 (MMC3) in the flag6 high nibble
    let rom = build_ines(&vec![0u8; 16 * 1024], &[0u8; 8192], 0x40, 0x00);

    let mut emulator = Emulator::new();
    assert!(matches!(
        emulator.load_rom_bytes(&rom),
        Err(RomError::UnsupportedMapper(4))
    ));
}
