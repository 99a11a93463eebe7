//! Implementation of chapter 9.3.3 State decision algorithm

use core::fmt::{Display, Formatter};

use super::dataset_comparison::{Dataset, DatasetComparator, DatasetOrdering};
use crate::{config::BmcaMode, port::PortState};

/// The decision codes of *IEEE1588-2019 figure 33*, naming the rule of the
/// state decision algorithm that produced a recommended state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionCode {
    /// A primary reference clock that is better than what the port hears
    M1,
    /// Our own clock is better than the best clock in the network
    M2,
    /// Another port follows a better clock, and this port leads to no loop
    M3,
    /// A primary reference clock that hears an even better one on this port
    P1,
    /// Another port follows a better clock, this port has a worse path to it
    P2,
    /// This port receives the best clock in the network
    S1,
}

impl DecisionCode {
    /// The port state this decision recommends
    pub fn state(&self) -> PortState {
        match self {
            DecisionCode::M1 | DecisionCode::M2 => PortState::GrandMaster,
            DecisionCode::M3 => PortState::Master,
            DecisionCode::P1 | DecisionCode::P2 => PortState::Passive,
            DecisionCode::S1 => PortState::Slave,
        }
    }
}

impl Display for DecisionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DecisionCode::M1 => write!(f, "M1"),
            DecisionCode::M2 => write!(f, "M2"),
            DecisionCode::M3 => write!(f, "M3"),
            DecisionCode::P1 => write!(f, "P1"),
            DecisionCode::P2 => write!(f, "P2"),
            DecisionCode::S1 => write!(f, "S1"),
        }
    }
}

/// The outcome of the state decision for a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDecision {
    /// The state the port should be in
    pub state: PortState,
    /// The rule that recommended [`state`](Self::state), or `None` when the
    /// port should stay in its current state
    pub code: Option<DecisionCode>,
}

impl StateDecision {
    fn unchanged(current_state: PortState) -> Self {
        Self {
            state: current_state,
            code: None,
        }
    }

    fn recommend(code: DecisionCode) -> Self {
        Self {
            state: code.state(),
            code: Some(code),
        }
    }
}

/// Calculates the recommended state of a single port. This has to be run for
/// every port.
///
/// - `own_data`: Called 'D0' by IEEE 1588. The dataset of our own instance.
/// - `network_best`: Called 'Ebest' by IEEE 1588. The best of the best
///   datasets of all ports, if any port heard a foreign master.
/// - `port_best`: Called 'Erbest' by IEEE 1588. The best dataset heard on
///   the port we are calculating the recommended state for.
/// - `port_is_holding_network_best`: whether `network_best` was received on
///   this port.
/// - `current_state`: The current state of the port.
/// - `bmca_mode`: whether the port takes part in the standard election.
///
/// Ebest must be computed from the Erbest of all ports before the decision
/// for any port is made, see [`Bmca`](crate::Bmca) for a helper that does so.
#[allow(clippy::too_many_arguments)]
pub fn state_decision<C: DatasetComparator + ?Sized>(
    own_data: &Dataset,
    network_best: Option<&Dataset>,
    port_best: Option<&Dataset>,
    port_is_holding_network_best: bool,
    current_state: PortState,
    bmca_mode: BmcaMode,
    comparator: &C,
) -> StateDecision {
    // Without anything heard on the port, a port with a pinned role and a
    // listening port are left alone
    if port_best.is_none()
        && (bmca_mode == BmcaMode::Disabled || current_state == PortState::Listening)
    {
        return StateDecision::unchanged(current_state);
    }

    let decision = if own_data.quality.is_primary_reference() {
        if comparator.compare(Some(own_data), port_best).is_better() {
            StateDecision::recommend(DecisionCode::M1)
        } else {
            StateDecision::recommend(DecisionCode::P1)
        }
    } else if comparator.compare(Some(own_data), network_best).is_better() {
        StateDecision::recommend(DecisionCode::M2)
    } else if port_is_holding_network_best {
        StateDecision::recommend(DecisionCode::S1)
    } else if comparator.compare(network_best, port_best) == DatasetOrdering::BetterByTopology {
        StateDecision::recommend(DecisionCode::P2)
    } else {
        StateDecision::recommend(DecisionCode::M3)
    };

    log::trace!(
        "State decision {:?}: {} -> {}",
        decision.code,
        current_state,
        decision.state
    );

    decision
}

/// Calculates the recommended state of a single port, see [`state_decision`]
/// for the meaning of the arguments.
///
/// Only ever returns [`PortState::Listening`], [`PortState::GrandMaster`],
/// [`PortState::Master`], [`PortState::Passive`] or [`PortState::Slave`],
/// unless the port keeps its `current_state`.
#[allow(clippy::too_many_arguments)]
pub fn decide<C: DatasetComparator + ?Sized>(
    own_data: &Dataset,
    network_best: Option<&Dataset>,
    port_best: Option<&Dataset>,
    port_is_holding_network_best: bool,
    current_state: PortState,
    bmca_mode: BmcaMode,
    comparator: &C,
) -> PortState {
    state_decision(
        own_data,
        network_best,
        port_best,
        port_is_holding_network_best,
        current_state,
        bmca_mode,
        comparator,
    )
    .state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bmc::dataset_comparison::{Ambiguity, StandardComparator},
        config::{ClockIdentity, ClockQuality, InstanceConfig, PortIdentity},
    };

    const OWN_IDENTITY: ClockIdentity = ClockIdentity([1, 1, 1, 1, 1, 1, 1, 1]);
    const GM_IDENTITY: ClockIdentity = ClockIdentity([2, 2, 2, 2, 2, 2, 2, 2]);
    const RELAY_A: ClockIdentity = ClockIdentity([3, 3, 3, 3, 3, 3, 3, 3]);
    const RELAY_B: ClockIdentity = ClockIdentity([4, 4, 4, 4, 4, 4, 4, 4]);

    fn own_dataset(clock_class: u8) -> Dataset {
        InstanceConfig {
            clock_identity: OWN_IDENTITY,
            priority_1: 128,
            priority_2: 128,
            clock_quality: ClockQuality {
                clock_class,
                ..Default::default()
            },
        }
        .own_dataset()
    }

    fn foreign_dataset(priority_1: u8, clock_class: u8, receiving_port: u16) -> Dataset {
        Dataset {
            identity: GM_IDENTITY,
            priority_1,
            priority_2: 128,
            quality: ClockQuality {
                clock_class,
                ..Default::default()
            },
            steps_removed: 0,
            sender: PortIdentity {
                clock_identity: GM_IDENTITY,
                port_number: 1,
            },
            receiver: PortIdentity {
                clock_identity: OWN_IDENTITY,
                port_number: receiving_port,
            },
        }
    }

    fn run(
        own: &Dataset,
        network_best: Option<&Dataset>,
        port_best: Option<&Dataset>,
        holding: bool,
        current_state: PortState,
    ) -> StateDecision {
        state_decision(
            own,
            network_best,
            port_best,
            holding,
            current_state,
            BmcaMode::Enabled,
            &StandardComparator,
        )
    }

    #[test]
    fn listening_port_stays_listening_without_data() {
        let own = own_dataset(6);
        let decision = run(&own, None, None, false, PortState::Listening);
        assert_eq!(decision.state, PortState::Listening);
        assert_eq!(decision.code, None);

        let own = own_dataset(248);
        let foreign = foreign_dataset(128, 6, 2);
        let decision = run(&own, Some(&foreign), None, false, PortState::Listening);
        assert_eq!(decision.state, PortState::Listening);
        assert_eq!(decision.code, None);
    }

    #[test]
    fn disabled_bmca_keeps_state_without_data() {
        let own = own_dataset(248);
        let foreign = foreign_dataset(50, 6, 2);

        for state in [PortState::Slave, PortState::Master, PortState::Faulty] {
            assert_eq!(
                decide(
                    &own,
                    Some(&foreign),
                    None,
                    false,
                    state,
                    BmcaMode::Disabled,
                    &StandardComparator,
                ),
                state
            );
        }

        // Once the port hears something, the normal decision applies
        assert_eq!(
            decide(
                &own,
                Some(&foreign),
                Some(&foreign),
                true,
                PortState::Master,
                BmcaMode::Disabled,
                &StandardComparator,
            ),
            PortState::Slave
        );
    }

    #[test]
    fn disabled_bmca_takes_precedence_over_primary_reference() {
        let own = own_dataset(6);
        let foreign = foreign_dataset(128, 248, 2);

        let decision = state_decision(
            &own,
            Some(&foreign),
            None,
            false,
            PortState::Slave,
            BmcaMode::Disabled,
            &StandardComparator,
        );
        assert_eq!(decision.state, PortState::Slave);
        assert_eq!(decision.code, None);
    }

    #[test]
    fn primary_reference_becomes_grandmaster() {
        let own = own_dataset(6);
        let foreign = foreign_dataset(128, 248, 1);

        let decision = run(&own, Some(&foreign), Some(&foreign), true, PortState::Listening);
        assert_eq!(decision.state, PortState::GrandMaster);
        assert_eq!(decision.code, Some(DecisionCode::M1));

        // Nothing heard on this port, but it is not listening anymore
        let decision = run(&own, Some(&foreign), None, false, PortState::Master);
        assert_eq!(decision.code, Some(DecisionCode::M1));
    }

    #[test]
    fn primary_reference_goes_passive() {
        let own = own_dataset(6);
        let foreign = foreign_dataset(100, 248, 1);

        let decision = run(&own, Some(&foreign), Some(&foreign), true, PortState::Listening);
        assert_eq!(decision.state, PortState::Passive);
        assert_eq!(decision.code, Some(DecisionCode::P1));
    }

    #[test]
    fn ordinary_clock_without_competition() {
        let own = own_dataset(248);
        let decision = run(&own, None, None, false, PortState::Master);
        assert_eq!(decision.state, PortState::GrandMaster);
        assert_eq!(decision.code, Some(DecisionCode::M2));

        let worse = foreign_dataset(200, 248, 1);
        let decision = run(&own, Some(&worse), Some(&worse), true, PortState::Listening);
        assert_eq!(decision.code, Some(DecisionCode::M2));
    }

    #[test]
    fn follows_the_network_best() {
        let own = own_dataset(248);
        let foreign = foreign_dataset(50, 248, 1);

        let decision = run(&own, Some(&foreign), Some(&foreign), true, PortState::Listening);
        assert_eq!(decision.state, PortState::Slave);
        assert_eq!(decision.code, Some(DecisionCode::S1));
    }

    #[test]
    fn passive_due_to_topology() {
        let own = own_dataset(248);

        // The same grandmaster, heard through two different relays on two ports
        let mut network_best = foreign_dataset(128, 6, 1);
        network_best.steps_removed = 3;
        network_best.sender = PortIdentity {
            clock_identity: RELAY_A,
            port_number: 1,
        };

        let mut port_best = foreign_dataset(128, 6, 2);
        port_best.steps_removed = 3;
        port_best.sender = PortIdentity {
            clock_identity: RELAY_B,
            port_number: 1,
        };

        let decision = run(
            &own,
            Some(&network_best),
            Some(&port_best),
            false,
            PortState::Master,
        );
        assert_eq!(decision.state, PortState::Passive);
        assert_eq!(decision.code, Some(DecisionCode::P2));
    }

    #[test]
    fn master_towards_worse_clocks() {
        let own = own_dataset(248);
        let network_best = foreign_dataset(50, 248, 1);

        let mut port_best = foreign_dataset(200, 248, 2);
        port_best.identity = RELAY_B;

        let decision = run(
            &own,
            Some(&network_best),
            Some(&port_best),
            false,
            PortState::Listening,
        );
        assert_eq!(decision.state, PortState::Master);
        assert_eq!(decision.code, Some(DecisionCode::M3));

        // Nothing heard on this port at all
        let decision = run(&own, Some(&network_best), None, false, PortState::Passive);
        assert_eq!(decision.code, Some(DecisionCode::M3));
    }

    #[test]
    fn ambiguous_comparisons_fall_through() {
        let undecided = |_: Option<&Dataset>, _: Option<&Dataset>| {
            DatasetOrdering::Ambiguous(Ambiguity::Error2)
        };

        let primary = own_dataset(6);
        let ordinary = own_dataset(248);
        let foreign = foreign_dataset(128, 248, 1);

        let state = |own: &Dataset, holding| {
            decide(
                own,
                Some(&foreign),
                Some(&foreign),
                holding,
                PortState::Listening,
                BmcaMode::Enabled,
                &undecided,
            )
        };

        assert_eq!(state(&primary, true), PortState::Passive);
        assert_eq!(state(&ordinary, true), PortState::Slave);
        assert_eq!(state(&ordinary, false), PortState::Master);
    }

    #[test]
    fn decision_codes_map_to_states() {
        assert_eq!(DecisionCode::M1.state(), PortState::GrandMaster);
        assert_eq!(DecisionCode::M2.state(), PortState::GrandMaster);
        assert_eq!(DecisionCode::M3.state(), PortState::Master);
        assert_eq!(DecisionCode::P1.state(), PortState::Passive);
        assert_eq!(DecisionCode::P2.state(), PortState::Passive);
        assert_eq!(DecisionCode::S1.state(), PortState::Slave);
    }
}
