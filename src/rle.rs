//! TGA run-length packets.
//!
//! Each packet starts with a control byte. Below 128 it is a raw packet of
//! `c + 1` literal pixels; from 128 up it is a run packet of `c - 127` copies
//! of the single pixel that follows.

use std::io::{Read, Write};

use enough::Stop;

use crate::error::TgaError;

/// Longest packet, in pixels, either kind can describe.
pub(crate) const MAX_PACKET_PIXELS: usize = 128;

/// Packets between cancellation checks.
const STOP_CHECK_INTERVAL: usize = 64;

/// Fill `out` (exactly `pixel_count * bpp` bytes) from RLE packets.
pub(crate) fn decode_rle<R: Read>(
    reader: &mut R,
    out: &mut [u8],
    bpp: usize,
    stop: &dyn Stop,
) -> Result<(), TgaError> {
    let total = out.len() / bpp;
    let mut current = 0usize;
    let mut packets = 0usize;
    let mut pixel = [0u8; 4];

    while current < total {
        if packets % STOP_CHECK_INTERVAL == 0 {
            stop.check()?;
        }
        packets += 1;

        let mut control = [0u8; 1];
        reader
            .read_exact(&mut control)
            .map_err(TgaError::from_payload_read)?;
        let control = control[0];
        let (count, is_run) = if control < 128 {
            (usize::from(control) + 1, false)
        } else {
            (usize::from(control) - 127, true)
        };

        if current + count > total {
            return Err(TgaError::RleOverrun {
                declared: total,
                decoded: current + count,
            });
        }

        let start = current * bpp;
        let end = start + count * bpp;
        if is_run {
            reader
                .read_exact(&mut pixel[..bpp])
                .map_err(TgaError::from_payload_read)?;
            for dst in out[start..end].chunks_exact_mut(bpp) {
                dst.copy_from_slice(&pixel[..bpp]);
            }
        } else {
            reader
                .read_exact(&mut out[start..end])
                .map_err(TgaError::from_payload_read)?;
        }
        current += count;
    }

    log::trace!("rle decode: {packets} packets for {total} pixels");
    Ok(())
}

/// Length and kind (`true` = run) of the packet starting at pixel `start`.
fn scan_packet(data: &[u8], bpp: usize, start: usize, total: usize) -> (usize, bool) {
    let pixel = |i: usize| &data[i * bpp..(i + 1) * bpp];
    let mut len = 1usize;
    let mut raw = true;
    while start + len < total && len < MAX_PACKET_PIXELS {
        let same = pixel(start + len - 1) == pixel(start + len);
        if len == 1 {
            raw = !same;
        }
        if raw && same {
            // the matching pair opens the next run packet
            len -= 1;
            break;
        }
        if !raw && !same {
            break;
        }
        len += 1;
    }
    (len, !raw)
}

/// Write `data` (whole pixels of `bpp` bytes) as greedy RLE packets.
pub(crate) fn encode_rle<W: Write>(
    writer: &mut W,
    data: &[u8],
    bpp: usize,
    stop: &dyn Stop,
) -> Result<(), TgaError> {
    let total = data.len() / bpp;
    let mut current = 0usize;
    let mut packets = 0usize;

    while current < total {
        if packets % STOP_CHECK_INTERVAL == 0 {
            stop.check()?;
        }
        packets += 1;

        let (len, is_run) = scan_packet(data, bpp, current, total);
        let start = current * bpp;
        // len is in 1..=128, so both control values fit a byte
        if is_run {
            writer.write_all(&[(len + 127) as u8])?;
            writer.write_all(&data[start..start + bpp])?;
        } else {
            writer.write_all(&[(len - 1) as u8])?;
            writer.write_all(&data[start..start + len * bpp])?;
        }
        current += len;
    }

    log::trace!("rle encode: {packets} packets for {total} pixels");
    Ok(())
}
