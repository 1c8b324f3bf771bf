use crate::Text;
use crate::capture::BootCapture;
use crate::interpret::{Interpretation, interpret};
use core::fmt;
use handover_abi::{Payload, Record, Tag, tag_name};
use kernel_memory_addresses::MapMemory;
use log::info;

/// Counters gathered over one walk.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct WalkSummary {
    /// Records visited; always the payload's record count.
    pub visited: usize,
    /// Records whose tag is not part of the protocol.
    pub unknown: usize,
}

/// Visit every record of `payload` once, in table order.
///
/// Each record is handed to [`interpret`] and then described by a single
/// `info` line, including records with unknown tags.
///
/// # Safety
/// See [`interpret`].
pub unsafe fn walk(
    payload: &Payload<'_>,
    memory: &impl MapMemory,
    capture: &mut BootCapture,
) -> WalkSummary {
    let mut summary = WalkSummary::default();

    for record in payload.records() {
        let outcome = unsafe { interpret(payload, memory, &record, capture) };

        summary.visited += 1;
        if outcome == Interpretation::Unknown {
            summary.unknown += 1;
        }

        let line = RecordLine {
            payload,
            record: &record,
        };
        info!("{line}");
    }

    summary
}

/// One diagnostic line describing a record.
struct RecordLine<'p, 'a> {
    payload: &'p Payload<'a>,
    record: &'p Record,
}

impl fmt::Display for RecordLine<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record;
        write!(
            f,
            "Handover tag: {}({:#x}) flags={:#x} start={:#x} end={:#x} size={:#x} ",
            tag_name(r.tag),
            r.tag,
            r.flags,
            r.start,
            r.end(),
            r.size
        )?;

        match r.kind() {
            Ok(Tag::Framebuffer) => match r.as_framebuffer() {
                Some(fb) => write!(
                    f,
                    "fb={}x{} pitch={} format={}",
                    fb.width, fb.height, fb.pitch, fb.format
                ),
                None => Ok(()),
            },
            Ok(Tag::File) => {
                let name = r.as_file().and_then(|file| self.payload.resolve(file.name));
                match name {
                    Some(name) => write!(f, "name={}", Text(name)),
                    None => f.write_str("name=<unresolved>"),
                }
            }
            _ => write!(f, "more={:#x}", r.more()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handover_abi::HANDOVER_MAGIC;
    use handover_abi::builder::PayloadBuilder;
    use kernel_memory_addresses::LowAddress;

    #[test]
    fn line_for_file_names_it() {
        let blob = PayloadBuilder::new(HANDOVER_MAGIC)
            .file(b"logo.tga", LowAddress::new(0x20_0000), 0x40)
            .build();
        let payload = Payload::parse(&blob, HANDOVER_MAGIC).unwrap();
        let record = payload.get(1).unwrap();

        let line = RecordLine {
            payload: &payload,
            record: &record,
        }
        .to_string();
        assert_eq!(
            line,
            "Handover tag: FILE(0xcbc36d3b) flags=0x0 start=0x200000 end=0x200040 size=0x40 name=logo.tga"
        );
    }

    #[test]
    fn line_for_unknown_tag_shows_more() {
        let blob = PayloadBuilder::new(HANDOVER_MAGIC)
            .raw(0xffff, LowAddress::new(0x1000), 0x10)
            .build();
        let payload = Payload::parse(&blob, HANDOVER_MAGIC).unwrap();
        let record = payload.get(1).unwrap();

        let line = RecordLine {
            payload: &payload,
            record: &record,
        }
        .to_string();
        assert!(line.starts_with("Handover tag: UNKNOWN(0xffff) "), "{line}");
        assert!(line.ends_with("more=0x0"), "{line}");
    }
}
