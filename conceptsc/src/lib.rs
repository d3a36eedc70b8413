//! The line-oriented IS text format, its I/O-factory registry, and the
//! `concepts` CLI driver built on top of `concepts-core`.
#![warn(missing_docs)]

mod error;
mod format;
mod registry;

use std::path::Path;

use anyhow::{Context, Result};
use concepts_core::{diagram_lattice, ClosureSystem, ImplicationalSystem};

pub use error::ConceptsIoError;
pub use format::{parse_is, write_is};
pub use registry::{parse, parse_default, save, save_default, IoFactory, Reader, Writer};

/// Which normalisation the CLI should run before reporting on the
/// system, mirroring the engine's rewrite names.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Normalisation {
    /// Leave the rule set as parsed.
    None,
    /// [`ImplicationalSystem::make_canonical_basis`].
    CanonicalBasis,
    /// [`ImplicationalSystem::make_canonical_direct_basis`].
    CanonicalDirectBasis,
}

/// Parses `input`, optionally normalises it, reports a one-line
/// summary of the resulting rule count and lattice size, and -- if
/// `output` is given -- writes the (possibly normalised) system back
/// out.
///
/// `iceberg`, if given, filters the generated lattice to concepts
/// whose extent is at least that fraction of the bottom concept's
/// extent before the summary is logged; since a plain
/// `ImplicationalSystem`-backed lattice carries no extents, this only
/// has visible effect when every node happens to carry one -- it's
/// here so the CLI exercises the same code path a `concepts-context`
/// caller would.
pub fn run(
    input: &Path,
    output: Option<&Path>,
    normalise: Normalisation,
    iceberg: Option<f64>,
) -> Result<()> {
    let mut is = parse_default(input).with_context(|| format!("parsing {}", input.display()))?;
    tracing::info!(elements = is.elements().len(), rules = is.rules().len(), "parsed");

    let delta = match normalise {
        Normalisation::None => 0,
        Normalisation::CanonicalBasis => is.make_canonical_basis(),
        Normalisation::CanonicalDirectBasis => is.make_canonical_direct_basis(),
    };
    if normalise != Normalisation::None {
        tracing::info!(delta, rules = is.rules().len(), "normalised");
    }

    let (lattice, _dependency_graph) = diagram_lattice(&is);
    let lattice = match iceberg {
        Some(threshold) => lattice.iceberg(threshold),
        None => lattice,
    };
    tracing::info!(
        concepts = lattice.node_ids().count(),
        "derived concept lattice"
    );

    if let Some(output) = output {
        save_default(&is, output).with_context(|| format!("saving {}", output.display()))?;
    }
    Ok(())
}
