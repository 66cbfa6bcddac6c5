//! Machine pool form core: request building and field validation.
//!
//! Form values go through [`validate::FieldValidator`] while the user edits,
//! then through [`request::RequestPayload::build`] once on submit. Both are
//! pure; [`submit::PoolSubmitter`] is the only part that does I/O.

pub mod entries;
pub mod request;
pub mod submit;
pub mod types;
pub mod validate;
pub mod visibility;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use request::{RequestPayload, build_classic_request, build_hosted_request};
pub use submit::{OcmSubmitter, PoolSubmitter};
pub use types::{BuildContext, FormValues, LabelEntry, SpotInstanceMode, TaintEntry};
pub use validate::{FieldError, FieldPath, FieldValidator, ValidationReport};
pub use visibility::{LabelSectionView, MAX_AWS_TAGS, RowView, TagCapabilities};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("clusters_mgmt error: {0}")]
    Ocm(#[from] ocm_api::Error),

    #[error("missing env var: {0}")]
    MissingEnv(String),

    #[error("unknown topology: {0}")]
    UnknownTopology(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// How a cluster manages its worker pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Workers scale with the cluster as machine pools.
    Classic,
    /// Hosted control plane; workers are separate node pools.
    Hosted,
}

impl Topology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Hosted => "hosted",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "classic" => Ok(Self::Classic),
            "hosted" => Ok(Self::Hosted),
            other => Err(Error::UnknownTopology(other.to_string())),
        }
    }
}
