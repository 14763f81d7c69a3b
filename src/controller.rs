//! The boundary between the console and the genome it edits.
//!
//! Console commands never touch annotation data themselves. They forward their
//! arguments to a [`Controller`], which owns the genome, its filters and every
//! file format involved. Each operation either returns text for the operator or
//! fails with an error that the console reports and survives.

use anyhow::Result;
use thiserror::Error;

/// Errors raised by the controllers shipped with this crate.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The operation is not provided by the attached controller.
    #[error("no genome controller attached: `{0}` is unavailable")]
    Unsupported(&'static str),
}

fn unsupported<T>(operation: &'static str) -> Result<T> {
    Err(ControllerError::Unsupported(operation).into())
}

/// Operations the console can request from the genome controller.
///
/// Every operation has a default body that fails with
/// [`ControllerError::Unsupported`], so an implementation only provides what it
/// actually supports.
pub trait Controller {
    /// Receives the carried output of the previous pipeline stage before each
    /// command runs. Empty outside of pipelines.
    fn set_input(&mut self, _input: &str) {}

    /// Read gff, fasta and trinotate files from a directory.
    fn load_folder(&mut self, _path: &str) -> Result<()> {
        unsupported("load_folder")
    }

    /// Write gff, fasta and trinotate files to a directory.
    fn barf_folder(&mut self, _path: &str) -> Result<String> {
        unsupported("barf_folder")
    }

    fn set_filter_arg(&mut self, _tokens: &[&str]) -> Result<()> {
        unsupported("set_filter_arg")
    }

    fn get_filter_arg(&mut self, _tokens: &[&str]) -> Result<String> {
        unsupported("get_filter_arg")
    }

    fn apply_filters(&mut self) -> Result<()> {
        unsupported("apply_filters")
    }

    /// Help for one filter, or for all filters when `filter` is empty.
    fn get_filter_help(&mut self, _filter: &str) -> Result<String> {
        unsupported("get_filter_help")
    }

    fn barf(&mut self, _line: &str) -> Result<String> {
        unsupported("barf")
    }

    fn status(&mut self) -> Result<String> {
        unsupported("status")
    }

    fn barf_to_file(&mut self, _path: &str) -> Result<()> {
        unsupported("barf_to_file")
    }

    fn ducttape(&mut self) -> Result<()> {
        unsupported("ducttape")
    }

    fn remove_mrna(&mut self, _mrna_id: &str) -> Result<()> {
        unsupported("remove_mrna")
    }

    fn remove_gene(&mut self, _prefix: &str) -> Result<()> {
        unsupported("remove_gene")
    }

    fn subset_genome(&mut self, _seq_ids: &[&str]) -> Result<String> {
        unsupported("subset_genome")
    }

    fn trim_region(&mut self, _tokens: &[&str]) -> Result<String> {
        unsupported("trim_region")
    }

    fn remove_seq(&mut self, _tokens: &[&str]) -> Result<()> {
        unsupported("remove_seq")
    }

    fn invalidate_region(&mut self, _tokens: &[&str]) -> Result<String> {
        unsupported("invalidate_region")
    }

    fn barf_gene_gff(&mut self, _gene_id: &str) -> Result<String> {
        unsupported("barf_gene_gff")
    }

    fn barf_seq(&mut self, _tokens: &[&str]) -> Result<String> {
        unsupported("barf_seq")
    }

    fn barf_cds_seq(&mut self, _mrna_id: &str) -> Result<String> {
        unsupported("barf_cds_seq")
    }

    fn barf_gene_tbl(&mut self, _gene_id: &str) -> Result<String> {
        unsupported("barf_gene_tbl")
    }

    /// Summary statistics for the original and the filtered genome.
    fn stats(&mut self) -> Result<String> {
        unsupported("stats")
    }

    fn write_tbl(&mut self, _path: &str) -> Result<String> {
        unsupported("write_tbl")
    }
}

/// Controller used when the console runs without a genome backend.
///
/// Every operation fails, which the console reports like any other command fault.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedController;

impl Controller for DetachedController {}
