//! Implementation of chapter 9.3.4 Data set comparison algorithm

use core::cmp::Ordering;

use crate::config::{ClockIdentity, ClockQuality, PortIdentity};

/// A collection of data that is gathered from other sources (mainly announce
/// messages and the DefaultDS). When gathered from two different sources,
/// [`compare_dataset`] can be used to find out which source is better
/// according to the dataset comparison algorithm.
///
/// Datasets are snapshots: they are created for a single run of the algorithm
/// and never updated afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    /// Identity of the grandmaster this dataset describes
    pub identity: ClockIdentity,
    pub priority_1: u8,
    pub priority_2: u8,
    /// Quality of the grandmaster clock
    pub quality: ClockQuality,
    /// Number of boundary clocks between the receiving port and the
    /// grandmaster
    pub steps_removed: u16,
    /// The port that sent the information. Only used for topology decisions.
    pub sender: PortIdentity,
    /// The local port that received the information. Only used for topology
    /// decisions.
    pub receiver: PortIdentity,
}

/// Why the comparison algorithm could not establish a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ambiguity {
    /// A dataset was compared to itself, or both were absent
    SameDataset,
    /// The datasets are one step apart but the receiver and sender of the
    /// longer path are the same port
    Error1,
    /// The datasets are indistinguishable, they are probably based on the same
    /// set of data
    Error2,
}

/// The ordering result of the dataset comparison algorithm, from the point of
/// view of the first dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DatasetOrdering {
    /// The first dataset is better than the one being compared against
    Better,
    /// The first dataset is of equal quality as the one being compared against,
    /// but is preferred because of the network topology
    BetterByTopology,
    /// No preference could be established
    Ambiguous(Ambiguity),
    /// The first dataset is of equal quality as the one being compared against,
    /// but is not preferred because of the network topology
    WorseByTopology,
    /// The first dataset is worse than the one being compared against
    Worse,
}

impl DatasetOrdering {
    /// Whether the first dataset is preferred, either on quality or on
    /// topology. An ambiguous result is never a preference.
    pub fn is_better(&self) -> bool {
        matches!(
            self,
            DatasetOrdering::Better | DatasetOrdering::BetterByTopology
        )
    }

    /// The same result from the point of view of the second dataset
    pub fn mirror(self) -> Self {
        match self {
            DatasetOrdering::Better => DatasetOrdering::Worse,
            DatasetOrdering::BetterByTopology => DatasetOrdering::WorseByTopology,
            DatasetOrdering::Ambiguous(reason) => DatasetOrdering::Ambiguous(reason),
            DatasetOrdering::WorseByTopology => DatasetOrdering::BetterByTopology,
            DatasetOrdering::Worse => DatasetOrdering::Better,
        }
    }
}

/// Compares two datasets that describe the same grandmaster on the path they
/// took to reach us (*IEEE1588-2019 figure 35*).
///
/// A path that is at least two steps shorter is simply better. When the
/// lengths differ by at most one step, the sender and receiver identities
/// decide which of the two paths would avoid a synchronization loop.
pub fn compare_topology(a: &Dataset, b: &Dataset) -> DatasetOrdering {
    let steps_a = u32::from(a.steps_removed);
    let steps_b = u32::from(b.steps_removed);

    if steps_a + 1 < steps_b {
        return DatasetOrdering::Better;
    }
    if steps_b + 1 < steps_a {
        return DatasetOrdering::Worse;
    }

    match steps_a.cmp(&steps_b) {
        Ordering::Less => match b.receiver.cmp(&b.sender) {
            Ordering::Less => DatasetOrdering::Better,
            Ordering::Greater => DatasetOrdering::BetterByTopology,
            Ordering::Equal => DatasetOrdering::Ambiguous(Ambiguity::Error1),
        },
        Ordering::Greater => match a.receiver.cmp(&a.sender) {
            Ordering::Less => DatasetOrdering::Worse,
            Ordering::Greater => DatasetOrdering::WorseByTopology,
            Ordering::Equal => DatasetOrdering::Ambiguous(Ambiguity::Error1),
        },
        Ordering::Equal => match a
            .sender
            .cmp(&b.sender)
            .then(a.receiver.port_number.cmp(&b.receiver.port_number))
        {
            Ordering::Less => DatasetOrdering::BetterByTopology,
            Ordering::Greater => DatasetOrdering::WorseByTopology,
            Ordering::Equal => DatasetOrdering::Ambiguous(Ambiguity::Error2),
        },
    }
}

/// Compares two datasets that may describe different grandmasters
/// (*IEEE1588-2019 figure 34*).
///
/// An absent dataset (`None`) loses from any present one. Datasets describing
/// the same grandmaster are compared with [`compare_topology`]. Otherwise the
/// first field that differs decides, in order: priority 1, clock class, clock
/// accuracy, offset scaled log variance, priority 2 and finally the
/// grandmaster identity. Lower values win.
pub fn compare_dataset(a: Option<&Dataset>, b: Option<&Dataset>) -> DatasetOrdering {
    let (a, b) = match (a, b) {
        (None, None) => return DatasetOrdering::Ambiguous(Ambiguity::SameDataset),
        (Some(_), None) => return DatasetOrdering::Better,
        (None, Some(_)) => return DatasetOrdering::Worse,
        (Some(a), Some(b)) => (a, b),
    };

    if core::ptr::eq(a, b) {
        return DatasetOrdering::Ambiguous(Ambiguity::SameDataset);
    }

    if a.identity == b.identity {
        return compare_topology(a, b);
    }

    let ordering = a
        .priority_1
        .cmp(&b.priority_1)
        .then(a.quality.clock_class.cmp(&b.quality.clock_class))
        .then(a.quality.clock_accuracy.cmp(&b.quality.clock_accuracy))
        .then(
            a.quality
                .offset_scaled_log_variance
                .cmp(&b.quality.offset_scaled_log_variance),
        )
        .then(a.priority_2.cmp(&b.priority_2))
        .then(a.identity.cmp(&b.identity));

    // The identities differ, so the ordering is never equal here
    match ordering {
        Ordering::Greater => DatasetOrdering::Worse,
        Ordering::Less | Ordering::Equal => DatasetOrdering::Better,
    }
}

/// A policy for comparing two (possibly absent) datasets.
///
/// The state decision is generic over this trait so it can run with a
/// different comparison than the standard one. Any function or closure with
/// the signature of [`compare_dataset`] is a comparator.
pub trait DatasetComparator {
    fn compare(&self, a: Option<&Dataset>, b: Option<&Dataset>) -> DatasetOrdering;
}

/// The dataset comparison algorithm of the standard, see [`compare_dataset`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StandardComparator;

impl DatasetComparator for StandardComparator {
    fn compare(&self, a: Option<&Dataset>, b: Option<&Dataset>) -> DatasetOrdering {
        compare_dataset(a, b)
    }
}

impl<F> DatasetComparator for F
where
    F: Fn(Option<&Dataset>, Option<&Dataset>) -> DatasetOrdering,
{
    fn compare(&self, a: Option<&Dataset>, b: Option<&Dataset>) -> DatasetOrdering {
        self(a, b)
    }
}
