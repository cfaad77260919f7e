//! Request-level types shared between the store and its callers.

use serde::{Deserialize, Serialize};

/// Where a translation request came from.
///
/// Only the missing-translation recording guard looks at this: with
/// `record_only_for_site_requests` enabled, misses are recorded for [`RequestOrigin::Site`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOrigin {
    /// Public front-end request.
    #[default]
    Site,
    /// Administrative (control panel) request.
    ControlPanel,
    /// Console command, queue job or other background work.
    Console,
}

impl RequestOrigin {
    pub fn is_site_request(self) -> bool {
        matches!(self, RequestOrigin::Site)
    }
}
