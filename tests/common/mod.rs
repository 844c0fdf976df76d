// Shared helpers for building in-memory iNES images

#![allow(dead_code)]

/// Assemble an iNES blob from raw PRG/CHR blocks
pub fn build_ines(prg: &[u8], chr: &[u8], flag6: u8, flag7: u8) -> Vec<u8> {
    assert!(prg.len() % 16384 == 0, "PRG must be a multiple of 16KB");
    assert!(chr.len() % 8192 == 0, "CHR must be a multiple of 8KB");

    let mut rom = Vec::new();
    rom.extend_from_slice(b"NES\x1a");
    rom.push((prg.len() / 16384) as u8);
    rom.push((chr.len() / 8192) as u8);
    rom.push(flag6);
    rom.push(flag7);
    rom.extend_from_slice(&[0; 8]);
    rom.extend_from_slice(prg);
    rom.extend_from_slice(chr);
    rom
}

/// Build a 32KB NROM image with a program and interrupt vectors
///
/// The program bytes land at `entry` (which becomes the reset vector);
/// `nmi_handler` bytes land at $9000, which becomes the NMI vector.
pub fn nrom_with_program(program: &[u8], nmi_handler: &[u8], entry: u16) -> Vec<u8> {
    let mut prg = vec![0u8; 32 * 1024];

    let offset = (entry - 0x8000) as usize;
    prg[offset..offset + program.len()].copy_from_slice(program);

    let nmi_offset = (0x9000 - 0x8000) as usize;
    prg[nmi_offset..nmi_offset + nmi_handler.len()].copy_from_slice(nmi_handler);

    // Vectors: NMI -> $9000, RESET -> entry, IRQ -> entry
    prg[0x7FFA] = 0x00;
    prg[0x7FFB] = 0x90;
    prg[0x7FFC] = (entry & 0xFF) as u8;
    prg[0x7FFD] = (entry >> 8) as u8;
    prg[0x7FFE] = (entry & 0xFF) as u8;
    prg[0x7FFF] = (entry >> 8) as u8;

    build_ines(&prg, &[0u8; 8192], 0x00, 0x00)
}
