mod common;

use common::{FakeMemory, capture_logs, logged, tga};
use handover_abi::builder::PayloadBuilder;
use handover_abi::{FramebufferRecord, HANDOVER_MAGIC, PixelFormat};
use kernel_gfx::framebuffer::BlitError;
use kernel_gfx::tga::TgaError;
use kernel_handover::{BlitReport, DrawError, LogoOutcome, WalkSummary, run};
use kernel_memory_addresses::LowAddress;

const FB_BASE: LowAddress = LowAddress::new(0xfd00_0000);
const LOGO_BASE: LowAddress = LowAddress::new(0x0030_0000);
const CANARY: u8 = 0xcc;

const WIDTH: u16 = 800;
const HEIGHT: u16 = 600;
const PITCH: u16 = 3200;
const FB_LEN: usize = 3200 * 600;

const LOGO_PIXELS: [[u8; 4]; 4] = [
    [0x10, 0x20, 0x30, 0xff],
    [0x40, 0x50, 0x60, 0xff],
    [0x70, 0x80, 0x90, 0xff],
    [0xa0, 0xb0, 0xc0, 0xff],
];

fn fb_record() -> FramebufferRecord {
    FramebufferRecord {
        start: FB_BASE,
        size: FB_LEN as u64,
        width: WIDTH,
        height: HEIGHT,
        pitch: PITCH,
        format: PixelFormat::Bgrx8888,
    }
}

/// Memory holding a canary-filled framebuffer and a 2x2 logo file.
fn machine_with_logo(logo: Vec<u8>) -> FakeMemory {
    let memory = FakeMemory::new();
    memory.insert_low(FB_BASE, vec![CANARY; FB_LEN]);
    memory.insert_low(LOGO_BASE, logo);
    memory
}

fn changed_offsets(memory: &FakeMemory) -> Vec<usize> {
    memory
        .read_low(FB_BASE, FB_LEN)
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b != CANARY)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn logo_is_drawn_with_custom_magic() {
    const MAGIC: u32 = 0xdead_beef;
    let logo = tga(2, 2, &LOGO_PIXELS);
    let logo_len = logo.len() as u64;
    let memory = machine_with_logo(logo);

    let payload = memory.insert_payload(
        PayloadBuilder::new(MAGIC)
            .agent(b"test-loader")
            .framebuffer(fb_record())
            .file(b"logo.tga", LOGO_BASE, logo_len)
            .build(),
    );

    let report = unsafe { run(&memory, payload, MAGIC) }.unwrap();
    assert_eq!(report.walk.visited, 3);
    assert_eq!(report.logo, LogoOutcome::Drawn(BlitReport { pixels: 4 }));

    let expected: Vec<usize> = (0..8).chain(3200..3208).collect();
    assert_eq!(changed_offsets(&memory), expected);

    let fb = memory.read_low(FB_BASE, 3208);
    assert_eq!(fb[0..4], [0x30, 0x20, 0x10, 0xff]);
    assert_eq!(fb[4..8], [0x60, 0x50, 0x40, 0xff]);
    assert_eq!(fb[3200..3204], [0x90, 0x80, 0x70, 0xff]);
    assert_eq!(fb[3204..3208], [0xc0, 0xb0, 0xa0, 0xff]);
}

#[test]
fn magic_mismatch_maps_only_the_header() {
    capture_logs();
    let memory = machine_with_logo(tga(2, 2, &LOGO_PIXELS));
    let payload = memory.insert_payload(
        PayloadBuilder::new(0x1234_5678)
            .framebuffer(fb_record())
            .file(b"logo.tga", LOGO_BASE, 34)
            .build(),
    );

    let err = unsafe { run(&memory, payload, HANDOVER_MAGIC) }.unwrap_err();
    assert_eq!(err.reason(), "payload magic");
    assert_eq!(memory.maps(), vec![(payload, 16)]);
    assert!(changed_offsets(&memory).is_empty());
    assert!(!logged().iter().any(|line| line.contains("Handover tag")));
}

#[test]
fn bad_sentinel_touches_no_record_memory() {
    let memory = machine_with_logo(tga(2, 2, &LOGO_PIXELS));
    let payload = memory.insert_payload(
        PayloadBuilder::without_sentinel(HANDOVER_MAGIC)
            .framebuffer(fb_record())
            .file(b"logo.tga", LOGO_BASE, 34)
            .build(),
    );

    let err = unsafe { run(&memory, payload, HANDOVER_MAGIC) }.unwrap_err();
    assert_eq!(err.reason(), "first record");
    assert_eq!(memory.calls(), 2);
    assert!(memory.maps().iter().all(|&(addr, _)| addr == payload));
}

#[test]
fn unknown_tag_is_logged_and_skipped() {
    capture_logs();
    let logo = tga(2, 2, &LOGO_PIXELS);
    let logo_len = logo.len() as u64;
    let memory = machine_with_logo(logo);
    let payload = memory.insert_payload(
        PayloadBuilder::new(HANDOVER_MAGIC)
            .raw(0xffff, LowAddress::new(0xdead_0000), 0x1000)
            .framebuffer(fb_record())
            .file(b"logo.tga", LOGO_BASE, logo_len)
            .build(),
    );

    let report = unsafe { run(&memory, payload, HANDOVER_MAGIC) }.unwrap();
    assert_eq!(
        report.walk,
        WalkSummary {
            visited: 4,
            unknown: 1
        }
    );
    assert_eq!(report.logo, LogoOutcome::Drawn(BlitReport { pixels: 4 }));

    let lines = logged();
    let tags: Vec<&String> = lines.iter().filter(|l| l.contains("Handover tag")).collect();
    assert_eq!(tags.len(), 4);
    assert!(tags[1].starts_with("[INFO] Handover tag: UNKNOWN(0xffff)"), "{}", tags[1]);
    assert!(tags[2].contains("FB(0xe2d55685)"), "{}", tags[2]);
    assert!(tags[3].contains("name=logo.tga"), "{}", tags[3]);
}

#[test]
fn logo_name_is_case_sensitive() {
    let logo = tga(2, 2, &LOGO_PIXELS);
    let logo_len = logo.len() as u64;
    let memory = machine_with_logo(logo);
    let payload = memory.insert_payload(
        PayloadBuilder::new(HANDOVER_MAGIC)
            .framebuffer(fb_record())
            .file(b"Logo.TGA", LOGO_BASE, logo_len)
            .build(),
    );

    let report = unsafe { run(&memory, payload, HANDOVER_MAGIC) }.unwrap();
    assert_eq!(
        report.logo,
        LogoOutcome::Missing {
            framebuffer: false,
            logo: true
        }
    );
    assert!(changed_offsets(&memory).is_empty());
}

#[test]
fn nothing_to_draw_without_records() {
    let memory = FakeMemory::new();
    let payload = memory.insert_payload(PayloadBuilder::new(HANDOVER_MAGIC).build());

    let report = unsafe { run(&memory, payload, HANDOVER_MAGIC) }.unwrap();
    assert_eq!(
        report.walk,
        WalkSummary {
            visited: 1,
            unknown: 0
        }
    );
    assert_eq!(
        report.logo,
        LogoOutcome::Missing {
            framebuffer: true,
            logo: true
        }
    );
}

#[test]
fn unsupported_logo_is_a_soft_failure() {
    capture_logs();
    let mut logo = tga(2, 2, &LOGO_PIXELS);
    logo[2] = 10;
    let logo_len = logo.len() as u64;
    let memory = machine_with_logo(logo);
    let payload = memory.insert_payload(
        PayloadBuilder::new(HANDOVER_MAGIC)
            .framebuffer(fb_record())
            .file(b"logo.tga", LOGO_BASE, logo_len)
            .build(),
    );

    let report = unsafe { run(&memory, payload, HANDOVER_MAGIC) }.unwrap();
    assert_eq!(
        report.logo,
        LogoOutcome::Failed(DrawError::Image(TgaError::Unsupported {
            image_type: 10,
            colour_map_type: 0,
            bits_per_pixel: 32
        }))
    );
    assert!(changed_offsets(&memory).is_empty());
    assert!(logged().iter().any(|l| l.starts_with("[WARN] Boot logo not drawn")));
}

#[test]
fn oversized_logo_is_refused() {
    let wide = vec![[1, 2, 3, 4]; usize::from(WIDTH) + 1];
    let logo = tga(WIDTH + 1, 1, &wide);
    let logo_len = logo.len() as u64;
    let memory = machine_with_logo(logo);
    let payload = memory.insert_payload(
        PayloadBuilder::new(HANDOVER_MAGIC)
            .framebuffer(fb_record())
            .file(b"logo.tga", LOGO_BASE, logo_len)
            .build(),
    );

    let report = unsafe { run(&memory, payload, HANDOVER_MAGIC) }.unwrap();
    assert_eq!(
        report.logo,
        LogoOutcome::Failed(DrawError::Blit(BlitError::DoesNotFit {
            width: 801,
            height: 1,
            fb_width: 800,
            fb_height: 600
        }))
    );
    assert!(changed_offsets(&memory).is_empty());
}
