use std::io::Write;

use super::{
    aligner::Aligner, classify::MappingSummary, config::Config, output::write_report,
    sam::count_records,
};

/// Align the input reads, count how many map to the transcriptome and write the
/// classification to `out`.
///
/// The aligner output is consumed line by line as it is produced, so memory use does
/// not depend on the size of the input.
pub fn sniff<A: Aligner, W: Write>(
    cfg: &Config,
    aligner: &mut A,
    out: &mut W,
) -> anyhow::Result<MappingSummary> {
    info!("Sniffing sequence data: {}", cfg.input_file().display());
    info!(
        "Using transcriptome reference: {}",
        cfg.ref_file().display()
    );
    info!(
        "Running {} alignment in memory (threads: {})",
        aligner.name(),
        cfg.threads()
    );

    let stream = aligner.start(&cfg.align_job())?;
    let counts = count_records(aligner.name(), stream)?;
    aligner.wait()?;

    let summary = MappingSummary::new(counts)?;
    info!(
        "{:.2}% of reads mapped, classified as {}",
        summary.percent_mapped(),
        summary.verdict()
    );
    write_report(out, &summary)?;
    Ok(summary)
}
