use std::io::BufRead;

use anyhow::Context;

/// SAM FLAG bit set when the segment is unmapped (0x4).  A record whose flag has this
/// bit clear counts as mapped.
pub const FLAG_UNMAPPED: u16 = 0x4;

/// Header lines in a SAM stream start with this character
const HEADER_MARKER: char = '@';

pub fn is_mapped(flag: u16) -> bool {
    flag & FLAG_UNMAPPED == 0
}

/// Running tally of parsed alignment records.  `mapped` can only be incremented together
/// with `total`, so `mapped <= total` always holds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MappingCounts {
    total: u64,
    mapped: u64,
}

impl MappingCounts {
    pub fn total(&self) -> u64 {
        self.total
    }
    pub fn mapped(&self) -> u64 {
        self.mapped
    }

    fn add_record(&mut self, flag: u16) {
        self.total += 1;
        if is_mapped(flag) {
            self.mapped += 1
        }
    }
}

/// Line based reader over a SAM text stream.  Only the flag field is looked at.
struct SamStream<R> {
    name: String,
    line: usize,
    buf: String,
    rdr: R,
}

impl<R: BufRead> SamStream<R> {
    fn new(name: &str, rdr: R) -> Self {
        Self {
            name: name.to_owned(),
            line: 0,
            buf: String::new(),
            rdr,
        }
    }

    // Get next line from stream.  Returns true if EOF
    fn get_line(&mut self) -> anyhow::Result<bool> {
        self.buf.clear();
        self.line += 1;
        Ok(self
            .rdr
            .read_line(&mut self.buf)
            .with_context(|| format!("Error reading from {} at line {}", self.name, self.line))?
            == 0)
    }

    // Returns the flag of the next alignment record, skipping headers and short lines.
    // None on EOF
    fn next_flag(&mut self) -> anyhow::Result<Option<u16>> {
        while !self.get_line()? {
            let s = self.buf.trim_end_matches(&['\n', '\r'][..]);
            if s.starts_with(HEADER_MARKER) {
                continue;
            }
            let mut fields = s.split('\t');
            let Some(flag) = fields.nth(1) else {
                trace!("{}:{} skipping short line", self.name, self.line);
                continue;
            };
            let flag = flag.trim().parse::<u16>().with_context(|| {
                format!(
                    "{}:{} Error parsing SAM flag '{}'",
                    self.name, self.line, flag
                )
            })?;
            return Ok(Some(flag));
        }
        Ok(None)
    }
}

/// Drain a SAM text stream, counting total and mapped alignment records.
/// `name` is only used in error messages.
pub fn count_records<R: BufRead>(name: &str, rdr: R) -> anyhow::Result<MappingCounts> {
    let mut stream = SamStream::new(name, rdr);
    let mut counts = MappingCounts::default();
    while let Some(flag) = stream.next_flag()? {
        counts.add_record(flag)
    }
    debug!(
        "Finished reading {}: {} records, {} mapped",
        name, counts.total, counts.mapped
    );
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(s: &str) -> anyhow::Result<MappingCounts> {
        count_records("test", s.as_bytes())
    }

    #[test]
    fn unmapped_bit() {
        assert!(is_mapped(0));
        assert!(is_mapped(16));
        assert!(is_mapped(256 | 2048));
        assert!(!is_mapped(4));
        assert!(!is_mapped(4 | 8 | 1));
    }

    #[test]
    fn all_mapped() {
        let s: String = (0..25)
            .map(|i| format!("read{}\t{}\tchr1\t100\n", i, if i % 2 == 0 { 0 } else { 16 }))
            .collect();
        let c = count(&s).unwrap();
        assert_eq!(c.total(), 25);
        assert_eq!(c.mapped(), 25);
    }

    #[test]
    fn all_unmapped() {
        let s: String = (0..10)
            .map(|i| format!("read{}\t4\t*\t0\n", i))
            .collect();
        let c = count(&s).unwrap();
        assert_eq!(c.total(), 10);
        assert_eq!(c.mapped(), 0);
    }

    #[test]
    fn headers_and_short_lines_are_skipped() {
        let s = "@HD\tVN:1.6\tSO:unsorted\n\
                 @SQ\tSN:tx1\tLN:1500\n\
                 @PG\tID:minimap2\tPN:minimap2\n\
                 r1\t0\ttx1\t10\n\
                 junk\n\
                 \n\
                 r2\t4\t*\t0\n\
                 another junk line without tabs\n\
                 r3\t16\ttx1\t44\n\
                 r4\t2052\n";
        let c = count(s).unwrap();
        assert_eq!(c.total(), 4);
        assert_eq!(c.mapped(), 2);
    }

    #[test]
    fn two_field_record_and_crlf() {
        let c = count("r1\t0\r\nr2\t4\r\n").unwrap();
        assert_eq!(c.total(), 2);
        assert_eq!(c.mapped(), 1);
    }

    #[test]
    fn no_trailing_newline() {
        let c = count("r1\t0\tx\nr2\t0").unwrap();
        assert_eq!(c.total(), 2);
        assert_eq!(c.mapped(), 2);
    }

    #[test]
    fn empty_stream() {
        let c = count("@HD\tVN:1.6\nshort\n").unwrap();
        assert_eq!(c, MappingCounts::default());
    }

    #[test]
    fn bad_flag_is_an_error() {
        let e = count("r1\t0\tx\nr2\tfour\tx\n").unwrap_err();
        let msg = format!("{:#}", e);
        assert!(msg.contains("test:2"), "{}", msg);
        assert!(msg.contains("four"), "{}", msg);
    }

    #[test]
    fn negative_flag_is_an_error() {
        assert!(count("r1\t-4\tx\n").is_err());
    }

    #[test]
    fn mapped_never_exceeds_total() {
        let s: String = (0..200u16)
            .map(|i| format!("r{}\t{}\n", i, i * 3))
            .collect();
        let c = count(&s).unwrap();
        assert_eq!(c.total(), 200);
        assert!(c.mapped() <= c.total());
        let expected = (0..200u16).filter(|i| is_mapped(i * 3)).count() as u64;
        assert_eq!(c.mapped(), expected);
    }
}
