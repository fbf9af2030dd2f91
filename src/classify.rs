use std::fmt::{self, Display, Formatter};

use super::{error::SniffError, sam::MappingCounts};

/// Mapping rates (percent) at or above this are called as RNA-seq
pub const RNA_THRESHOLD: f64 = 60.0;
/// Mapping rates (percent) at or below this are called as DNA-seq
pub const DNA_THRESHOLD: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Rna,
    Dna,
    Ambiguous,
}

impl Verdict {
    pub fn from_percent(pct: f64) -> Self {
        if pct >= RNA_THRESHOLD {
            Self::Rna
        } else if pct <= DNA_THRESHOLD {
            Self::Dna
        } else {
            Self::Ambiguous
        }
    }

    pub fn conclusion(&self) -> &'static str {
        match self {
            Self::Rna => ">>> CONCLUSION: RNA-seq Detected (High Transcriptome Overlap) <<<",
            Self::Dna => ">>> CONCLUSION: DNA-seq Detected (Low Transcriptome Overlap) <<<",
            Self::Ambiguous => {
                ">>> CONCLUSION: Ambiguous / Targeted Exome Panel (Manual Review Required) <<<"
            }
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rna => "RNA-seq",
            Self::Dna => "DNA-seq",
            Self::Ambiguous => "ambiguous",
        };
        f.write_str(s)
    }
}

/// Counts from a drained alignment stream together with the derived mapping rate
#[derive(Debug, Clone, Copy)]
pub struct MappingSummary {
    counts: MappingCounts,
    percent_mapped: f64,
    verdict: Verdict,
}

impl MappingSummary {
    /// Fails with [`SniffError::NoData`] if no records were counted
    pub fn new(counts: MappingCounts) -> Result<Self, SniffError> {
        if counts.total() == 0 {
            return Err(SniffError::NoData);
        }
        let percent_mapped = 100.0 * counts.mapped() as f64 / counts.total() as f64;
        Ok(Self {
            counts,
            percent_mapped,
            verdict: Verdict::from_percent(percent_mapped),
        })
    }

    pub fn total(&self) -> u64 {
        self.counts.total()
    }
    pub fn mapped(&self) -> u64 {
        self.counts.mapped()
    }
    pub fn percent_mapped(&self) -> f64 {
        self.percent_mapped
    }
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}
