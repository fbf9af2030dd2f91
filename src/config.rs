use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use clap::ArgMatches;

use super::{aligner::AlignJob, cli::cli_model, utils::init_log};

#[derive(Debug)]
pub struct Config {
    // Reads to classify, in any format the aligner accepts
    input_file: PathBuf,
    // Transcriptome FASTA used as the alignment target
    ref_file: PathBuf,
    // Passed through to the aligner
    threads: usize,
}

impl Config {
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }
    pub fn ref_file(&self) -> &Path {
        &self.ref_file
    }
    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn align_job(&self) -> AlignJob {
        AlignJob {
            input: self.input_file.clone(),
            reference: self.ref_file.clone(),
            threads: self.threads,
        }
    }

    pub(crate) fn from_matches(m: &ArgMatches) -> anyhow::Result<Self> {
        let input_file = m
            .get_one::<PathBuf>("input")
            .ok_or_else(|| anyhow!("Missing input file"))?
            .to_owned();

        let ref_file = m
            .get_one::<PathBuf>("reference")
            .ok_or_else(|| anyhow!("Missing reference"))?
            .to_owned();

        // Zero is rejected by the parser
        let threads = m
            .get_one::<NonZeroUsize>("threads")
            .map(|i| usize::from(*i))
            .ok_or_else(|| anyhow!("Missing default threads value"))?;

        let cpus = num_cpus::get();
        if threads > cpus {
            warn!(
                "{} threads requested for the aligner but only {} cpus available",
                threads, cpus
            )
        }

        Ok(Config {
            input_file,
            ref_file,
            threads,
        })
    }
}

pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m);

    debug!("Processing command line options");
    Config::from_matches(&m)
}
