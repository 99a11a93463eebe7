//! Implementation of the best master clock algorithm [Bmca]

use super::{
    dataset_comparison::{Dataset, DatasetComparator, StandardComparator},
    state_decision::{state_decision, StateDecision},
};
use crate::{
    config::{BmcaMode, PortIdentity},
    port::PortState,
};

/// Finds the best dataset among `candidates`.
///
/// This is how both the best dataset of a single port (Erbest) and the best
/// dataset of the whole instance (Ebest) are selected. When the comparison
/// cannot decide between two candidates, the one that came first is kept.
pub fn find_best<'a, C: DatasetComparator + ?Sized>(
    candidates: impl IntoIterator<Item = &'a Dataset>,
    comparator: &C,
) -> Option<&'a Dataset> {
    candidates.into_iter().reduce(|best, candidate| {
        if comparator.compare(Some(candidate), Some(best)).is_better() {
            candidate
        } else {
            best
        }
    })
}

/// What the algorithm needs to know about a single port for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSnapshot {
    pub port_identity: PortIdentity,
    /// The best dataset heard on this port (Erbest), if any
    pub best: Option<Dataset>,
    /// The current state of the port
    pub state: PortState,
    pub bmca_mode: BmcaMode,
}

/// Object running the Best Master Clock Algorithm for a whole instance
///
/// Usage:
///
/// - The caller determines the best dataset received on every port, for
///   example with [`find_best`].
/// - For every run of the algorithm, it passes a [`PortSnapshot`] of every
///   port to [`Bmca::recommend`].
/// - It then applies the recommended states to the ports.
///
/// Because [`Bmca::recommend`] determines the best dataset of the instance
/// before it makes a decision for any port, all decisions of a run are based
/// on the same data.
#[derive(Debug, Clone)]
pub struct Bmca<C = StandardComparator> {
    own_data: Dataset,
    comparator: C,
}

impl<C: DatasetComparator> Bmca<C> {
    /// - `own_data`: The dataset of our own instance, see
    ///   [`InstanceConfig::own_dataset`](crate::config::InstanceConfig::own_dataset)
    /// - `comparator`: The comparison used for all decisions
    pub fn new(own_data: Dataset, comparator: C) -> Self {
        Self {
            own_data,
            comparator,
        }
    }

    pub fn own_data(&self) -> &Dataset {
        &self.own_data
    }

    /// Finds Ebest, the best of the datasets received on all ports, together
    /// with the index of the port that received it.
    pub fn network_best<'a>(&self, ports: &'a [PortSnapshot]) -> Option<(usize, &'a Dataset)> {
        let best = find_best(
            ports.iter().filter_map(|port| port.best.as_ref()),
            &self.comparator,
        )?;

        let holder = ports.iter().position(|port| {
            port.best
                .as_ref()
                .map_or(false, |candidate| core::ptr::eq(candidate, best))
        })?;

        Some((holder, best))
    }

    /// Calculates the recommended state of every port in `ports`, in the same
    /// order.
    pub fn recommend<'a>(
        &'a self,
        ports: &'a [PortSnapshot],
    ) -> impl Iterator<Item = (PortIdentity, StateDecision)> + 'a
    where
        C: 'a,
    {
        let network_best = self.network_best(ports);

        match network_best {
            Some((holder, best)) => log::debug!(
                "Best master {} ({} steps removed) is received on {}",
                best.identity,
                best.steps_removed,
                ports[holder].port_identity
            ),
            None => log::debug!("No foreign master known on any port"),
        }

        ports.iter().enumerate().map(move |(index, port)| {
            let holding = matches!(network_best, Some((holder, _)) if holder == index);

            let decision = state_decision(
                &self.own_data,
                network_best.map(|(_, best)| best),
                port.best.as_ref(),
                holding,
                port.state,
                port.bmca_mode,
                &self.comparator,
            );

            (port.port_identity, decision)
        })
    }
}
