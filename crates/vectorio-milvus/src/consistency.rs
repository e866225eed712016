//! Milvus consistency levels.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Consistency levels understood by Milvus.
///
/// The connection config carries the level as a plain string so that names
/// introduced by newer servers pass through untouched. This enum covers the
/// levels known at the time of writing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, AsRefStr)]
pub enum ConsistencyLevel {
    /// Reads observe every write acknowledged before the request.
    #[default]
    Strong,
    /// Reads observe the writes of the same client session.
    Session,
    /// Reads may lag behind writes within a bounded staleness window.
    Bounded,
    /// No freshness guarantee.
    Eventually,
    /// Freshness is controlled by an explicit guarantee timestamp.
    Customized,
}

impl From<ConsistencyLevel> for String {
    fn from(level: ConsistencyLevel) -> Self {
        level.as_ref().to_owned()
    }
}
