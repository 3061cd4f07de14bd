//! Kind detection
//!
//! Candidates are tried in a fixed order. Each candidate rescans the
//! container from its first variable and stops at the first variable it
//! accepts. A candidate whose accepted variable fails the structural check
//! gives way to the next candidate; framing errors end the probe.

use linmat_core::{LinearOperatorInfo, OperatorKind};
use tracing::{debug, warn};

use crate::codec::{KindCodec, PROBE_ORDER};
use crate::container::{ContainerReader, Variable};
use crate::error::{CodecError, Error, Result};

/// Outcome of a successful probe
#[derive(Debug)]
pub struct Probe<'r> {
    pub info: LinearOperatorInfo,
    pub codec: &'static dyn KindCodec,
    /// Variable that matched, still borrowing the container
    pub variable: Variable<'r>,
}

impl Probe<'_> {
    pub fn kind(&self) -> OperatorKind {
        self.codec.kind()
    }
}

/// Detect the kind of the stored object using every codec
pub fn probe(reader: &ContainerReader) -> Result<Probe<'_>> {
    probe_with(reader, &PROBE_ORDER)
}

/// Detect the stored object using `candidates`, in order
pub fn probe_with<'r>(
    reader: &'r ContainerReader,
    candidates: &[&'static dyn KindCodec],
) -> Result<Probe<'r>> {
    for &codec in candidates {
        debug!(candidate = %codec.kind(), "probing");
        for variable in reader.variables() {
            let variable = variable.map_err(|source| Error::Format {
                path: reader.path().to_path_buf(),
                source,
            })?;
            if !codec.accepts(&variable) {
                debug!(
                    candidate = %codec.kind(),
                    name = variable.name(),
                    class = ?variable.class(),
                    rank = variable.rank(),
                    "variable not accepted"
                );
                continue;
            }

            match codec.describe(&variable) {
                Ok(info) => {
                    debug!(kind = %codec.kind(), name = variable.name(), "probe matched");
                    return Ok(Probe {
                        info,
                        codec,
                        variable,
                    });
                }
                Err(CodecError::Malformed { expected }) => {
                    warn!(
                        candidate = %codec.kind(),
                        name = variable.name(),
                        expected,
                        "malformed content, trying next candidate"
                    );
                    break;
                }
                Err(e) => return Err(e.into_error(reader.path())),
            }
        }
    }
    Err(Error::AmbiguousOrUnknownObject {
        path: reader.path().to_path_buf(),
    })
}
