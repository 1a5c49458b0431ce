//! Row frame assembler
//!
//! A custom frame buffer is a sequence of row segments:
//!
//! ```text
//! [row] [start_col] [stop_col] [R G B] * (stop_col - start_col + 1)
//! ```
//!
//! [`assemble`] walks the buffer lazily and yields one SET_CUSTOM_FRAME
//! report per segment. Parsing stops at the first malformed segment; the
//! reports already yielded stay valid.

use std::fmt;

use razer_transport::Report;

use crate::effects;

/// Bytes in a segment header
pub const SEGMENT_HEADER_LEN: usize = 3;

/// Why parsing stopped before the end of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStop {
    /// Fewer than three bytes left for a header
    Truncated { remaining: usize },
    /// `start_col > stop_col`
    InvertedRange { start: u8, stop: u8 },
    /// Header promised more pixel bytes than the buffer holds
    ShortPixelData { needed: usize, available: usize },
}

impl fmt::Display for FrameStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { remaining } => write!(
                f,
                "wrong amount of data: {remaining} trailing bytes, expected ROW_ID, START_COL, STOP_COL, N_RGB"
            ),
            Self::InvertedRange { start, stop } => {
                write!(f, "start column {start} is greater than end column {stop}")
            }
            Self::ShortPixelData { needed, available } => write!(
                f,
                "not enough RGB to fill row: need {needed} bytes, have {available}"
            ),
        }
    }
}

/// One parsed row segment, borrowing its pixels from the frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSegment<'a> {
    pub row: u8,
    pub start: u8,
    pub stop: u8,
    /// `(stop - start + 1) * 3` bytes of R, G, B
    pub pixels: &'a [u8],
}

impl<'a> RowSegment<'a> {
    /// Parse the segment at the front of `buf`.
    ///
    /// Returns the segment and the number of bytes it occupies.
    pub fn parse(buf: &'a [u8]) -> Result<(Self, usize), FrameStop> {
        let [row, start, stop, rest @ ..] = buf else {
            return Err(FrameStop::Truncated {
                remaining: buf.len(),
            });
        };
        if start > stop {
            return Err(FrameStop::InvertedRange {
                start: *start,
                stop: *stop,
            });
        }

        let needed = (*stop as usize - *start as usize + 1) * 3;
        if rest.len() < needed {
            return Err(FrameStop::ShortPixelData {
                needed,
                available: rest.len(),
            });
        }

        let segment = Self {
            row: *row,
            start: *start,
            stop: *stop,
            pixels: &rest[..needed],
        };
        Ok((segment, SEGMENT_HEADER_LEN + needed))
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / 3
    }

    /// SET_CUSTOM_FRAME request for this segment
    pub fn to_report(&self) -> Report {
        effects::set_custom_frame_row(self.row, self.start, self.stop, self.pixels)
    }
}

/// Lazy iterator over the row reports of a frame buffer
#[derive(Debug, Clone)]
pub struct RowFrames<'a> {
    buf: &'a [u8],
    offset: usize,
    stop: Option<FrameStop>,
}

impl<'a> RowFrames<'a> {
    /// Why iteration ended early, if it did
    pub fn stop_reason(&self) -> Option<FrameStop> {
        self.stop
    }

    /// Bytes consumed so far
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for RowFrames<'_> {
    type Item = Report;

    fn next(&mut self) -> Option<Report> {
        if self.stop.is_some() || self.offset >= self.buf.len() {
            return None;
        }

        match RowSegment::parse(&self.buf[self.offset..]) {
            Ok((segment, consumed)) => {
                self.offset += consumed;
                Some(segment.to_report())
            }
            Err(reason) => {
                self.stop = Some(reason);
                None
            }
        }
    }
}

/// Split a frame buffer into row reports
pub fn assemble(buf: &[u8]) -> RowFrames<'_> {
    RowFrames {
        buf,
        offset: 0,
        stop: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use razer_transport::protocol::{cmd, transaction};

    #[test]
    fn test_single_row() {
        let buf = [0x00, 0x00, 0x01, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00];
        let mut frames = assemble(&buf);
        let report = frames.next().unwrap();
        assert_eq!(report.command_id, cmd::SET_CUSTOM_FRAME);
        assert_eq!(report.transaction_id, transaction::CUSTOM_FRAME);
        assert_eq!(report.data_size, 11);
        assert_eq!(
            &report.arguments[..11],
            &[0x00, 0x00, 0x00, 0x00, 0x01, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00]
        );
        assert!(frames.next().is_none());
        assert_eq!(frames.stop_reason(), None);
    }

    #[test]
    fn test_multiple_rows() {
        let mut buf = vec![0x00, 0x00, 0x00, 1, 2, 3];
        buf.extend_from_slice(&[0x03, 0x05, 0x06, 4, 5, 6, 7, 8, 9]);
        let reports: Vec<_> = assemble(&buf).collect();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].arguments[2], 0x03);
        assert_eq!(reports[1].arguments[3], 0x05);
        assert_eq!(reports[1].arguments[4], 0x06);
    }

    #[test]
    fn test_inverted_range_stops_everything() {
        let buf = [0x00, 0x05, 0x02, 1, 2, 3, 0x00, 0x00, 0x00, 1, 2, 3];
        let mut frames = assemble(&buf);
        assert!(frames.next().is_none());
        assert_eq!(
            frames.stop_reason(),
            Some(FrameStop::InvertedRange { start: 5, stop: 2 })
        );
        assert!(frames.next().is_none());
    }

    #[test]
    fn test_short_pixel_data() {
        let buf = [0x00, 0x00, 0x02, 1, 2, 3, 4, 5];
        let mut frames = assemble(&buf);
        assert!(frames.next().is_none());
        assert_eq!(
            frames.stop_reason(),
            Some(FrameStop::ShortPixelData {
                needed: 9,
                available: 5
            })
        );
    }

    #[test]
    fn test_truncated_after_valid_row() {
        let buf = [0x01, 0x00, 0x00, 9, 9, 9, 0x02, 0x00];
        let mut frames = assemble(&buf);
        assert!(frames.next().is_some());
        assert!(frames.next().is_none());
        assert_eq!(
            frames.stop_reason(),
            Some(FrameStop::Truncated { remaining: 2 })
        );
        assert_eq!(frames.offset(), 6);
    }

    #[test]
    fn test_empty_buffer() {
        let mut frames = assemble(&[]);
        assert!(frames.next().is_none());
        assert_eq!(frames.stop_reason(), None);
    }

    #[test]
    fn test_full_width_row_length_in_usize() {
        // 0..=255 would overflow a byte-sized length
        let mut buf = vec![0x00, 0x00, 0xFF];
        buf.extend(std::iter::repeat(0x10).take(256 * 3));
        let (segment, consumed) = RowSegment::parse(&buf).unwrap();
        assert_eq!(segment.pixel_count(), 256);
        assert_eq!(consumed, 3 + 768);

        let report = segment.to_report();
        assert_eq!(report.data_size, 80);
    }

    #[test]
    fn test_restart_by_reassembling() {
        let buf = [0x00, 0x00, 0x00, 1, 2, 3];
        assert_eq!(assemble(&buf).count(), 1);
        assert_eq!(assemble(&buf).count(), 1);
    }
}
