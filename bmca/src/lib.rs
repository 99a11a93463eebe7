//! The best master clock algorithm (BMCA) of PTP (IEEE1588-2019).
//!
//! Every PTP instance in a network runs this algorithm locally on the datasets
//! it knows about. Because the algorithm is fully deterministic, all instances
//! converge on the same grandmaster without any coordination. This crate
//! contains only the decision part of the algorithm:
//!
//! * The dataset comparison algorithm (*IEEE1588-2019 section 9.3.4*), see
//!   [`compare_dataset`] and [`compare_topology`].
//! * The state decision algorithm (*IEEE1588-2019 section 9.3.3*), see
//!   [`decide`] and [`state_decision`].
//! * A small helper, [`Bmca`], that runs one full cycle of the algorithm over
//!   all ports of an instance.
//!
//! # Device interfaces
//! Receiving announce messages, qualifying foreign masters, running timers and
//! acting on a new port state are left to the user of the library. The
//! library only needs snapshots of the relevant datasets, and is `no_std` so
//! it can be used on embedded targets as well.
//!
//! # Example
//! ```
//! use bmca::{
//!     config::{ClockIdentity, ClockQuality, InstanceConfig},
//!     decide, BmcaMode, Dataset, PortIdentity, PortState, StandardComparator,
//! };
//!
//! let instance = InstanceConfig {
//!     clock_identity: ClockIdentity([1; 8]),
//!     priority_1: 128,
//!     priority_2: 128,
//!     clock_quality: ClockQuality::default(),
//! };
//! let own = instance.own_dataset();
//!
//! let foreign = Dataset {
//!     priority_1: 50,
//!     identity: ClockIdentity([2; 8]),
//!     sender: PortIdentity {
//!         clock_identity: ClockIdentity([2; 8]),
//!         port_number: 1,
//!     },
//!     receiver: PortIdentity {
//!         clock_identity: ClockIdentity([1; 8]),
//!         port_number: 1,
//!     },
//!     ..own
//! };
//!
//! let state = decide(
//!     &own,
//!     Some(&foreign),
//!     Some(&foreign),
//!     true,
//!     PortState::Listening,
//!     BmcaMode::Enabled,
//!     &StandardComparator,
//! );
//! assert_eq!(state, PortState::Slave);
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod bmc;
pub mod config;
pub(crate) mod datastructures;
pub mod port;

pub use bmc::{
    bmca::{find_best, Bmca, PortSnapshot},
    dataset_comparison::{
        compare_dataset, compare_topology, Ambiguity, Dataset, DatasetComparator,
        DatasetOrdering, StandardComparator,
    },
    state_decision::{decide, state_decision, DecisionCode, StateDecision},
};
pub use config::{BmcaMode, PortIdentity};
pub use port::PortState;
