use crate::scaling::ScaleError;
use std::fmt;
use std::str::FromStr;

/// Workload kinds which can be scaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    ReplicaSet,
    ReplicationController,
    /// Scaled through its parallelism, as jobs have no scale sub-resource.
    Job,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        Self::Deployment,
        Self::ReplicaSet,
        Self::ReplicationController,
        Self::Job,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::ReplicaSet => "ReplicaSet",
            Self::ReplicationController => "ReplicationController",
            Self::Job => "Job",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScaleError::UnsupportedKind(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_any_casing() {
        for input in ["job", "Job", "JOB", "jOb"] {
            assert_eq!(input.parse::<ResourceKind>().unwrap(), ResourceKind::Job);
        }
        assert_eq!(
            "replicationcontroller".parse::<ResourceKind>().unwrap(),
            ResourceKind::ReplicationController
        );
        assert_eq!(
            "DEPLOYMENT".parse::<ResourceKind>().unwrap(),
            ResourceKind::Deployment
        );
        assert_eq!(
            "ReplicaSet".parse::<ResourceKind>().unwrap(),
            ResourceKind::ReplicaSet
        );
    }

    #[test]
    fn reject_unknown() {
        for input in ["", "jobs", "statefulset", "pod"] {
            match input.parse::<ResourceKind>() {
                Err(ScaleError::UnsupportedKind(kind)) => assert_eq!(kind, input),
                other => panic!("unexpected result for {input:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn display_round_trips() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.to_string().parse::<ResourceKind>().unwrap(), kind);
        }
    }
}
