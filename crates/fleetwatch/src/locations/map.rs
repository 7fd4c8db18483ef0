//! Map — turns the raw instance inventory into an addressable location map.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::warn;

use crate::director::InstanceRecord;

/// Identity of one instance within a deployment for the duration of a
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub job_name: String,
    pub index: u32,
}

impl Location {
    pub fn new(job_name: impl Into<String>, index: u32) -> Self {
        Self {
            job_name: job_name.into(),
            index,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.job_name, self.index)
    }
}

/// Location key → first reported network address. Built once per session
/// and read-only afterwards.
pub type LocationMap = HashMap<Location, String>;

/// Build the location map from the deployment's instance inventory.
///
/// An empty `components` set means "all components". An empty result is
/// valid data here; deciding that it is fatal belongs to the session.
pub fn resolve(instances: &[InstanceRecord], components: &HashSet<String>) -> LocationMap {
    let mut map = LocationMap::new();

    for instance in instances {
        if !components.is_empty() && !components.contains(&instance.job_name) {
            continue;
        }

        let Some(address) = instance.ips.first() else {
            warn!(
                job_name = %instance.job_name,
                index = instance.index,
                "instance reports no address, skipping"
            );
            continue;
        };

        map.insert(
            Location::new(instance.job_name.clone(), instance.index),
            address.clone(),
        );
    }

    map
}
