// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::Proposal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStep {
    Intake,
    Proposal,
    Contract,
    Payment,
}

impl WorkflowStep {
    pub const ALL: [Self; 4] = [Self::Intake, Self::Proposal, Self::Contract, Self::Payment];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Proposal => "proposal",
            Self::Contract => "contract",
            Self::Payment => "payment",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Intake => 0,
            Self::Proposal => 1,
            Self::Contract => 2,
            Self::Payment => 3,
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Intake => Some(Self::Proposal),
            Self::Proposal => Some(Self::Contract),
            Self::Contract => Some(Self::Payment),
            Self::Payment => None,
        }
    }

    const fn prev(self) -> Option<Self> {
        match self {
            Self::Intake => None,
            Self::Proposal => Some(Self::Intake),
            Self::Contract => Some(Self::Proposal),
            Self::Payment => Some(Self::Contract),
        }
    }
}

/// The linear case stepper. Forward motion out of the proposal step is
/// gated on a recorded proposal; once recorded, the gate stays open even if
/// the builder inputs later drift invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseWorkflow {
    pub step: WorkflowStep,
    pub proposal: Option<Proposal>,
}

impl Default for CaseWorkflow {
    fn default() -> Self {
        Self {
            step: WorkflowStep::Intake,
            proposal: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowCommand {
    Advance,
    Back,
    RecordProposal(Proposal),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    StepChanged(WorkflowStep),
    AdvanceBlocked(WorkflowStep),
    ProposalRecorded(Proposal),
    WorkflowReset,
}

impl CaseWorkflow {
    pub fn dispatch(&mut self, command: WorkflowCommand) -> Vec<WorkflowEvent> {
        match command {
            WorkflowCommand::Advance => self.advance(),
            WorkflowCommand::Back => match self.step.prev() {
                Some(prev) => {
                    self.step = prev;
                    vec![WorkflowEvent::StepChanged(self.step)]
                }
                None => Vec::new(),
            },
            WorkflowCommand::RecordProposal(proposal) => {
                self.proposal = Some(proposal);
                vec![WorkflowEvent::ProposalRecorded(proposal)]
            }
            WorkflowCommand::Reset => {
                *self = Self::default();
                vec![WorkflowEvent::WorkflowReset]
            }
        }
    }

    pub fn can_advance(&self) -> bool {
        match self.step {
            WorkflowStep::Proposal => self.proposal.is_some(),
            WorkflowStep::Payment => false,
            WorkflowStep::Intake | WorkflowStep::Contract => true,
        }
    }

    fn advance(&mut self) -> Vec<WorkflowEvent> {
        if !self.can_advance() {
            if self.step == WorkflowStep::Payment {
                return Vec::new();
            }
            return vec![WorkflowEvent::AdvanceBlocked(self.step)];
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                vec![WorkflowEvent::StepChanged(self.step)]
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseWorkflow, WorkflowCommand, WorkflowEvent, WorkflowStep};
    use crate::{PresetKind, ProposalInputs};

    fn valid_proposal() -> crate::Proposal {
        ProposalInputs::for_preset(550_000, PresetKind::Balanced)
            .proposal()
            .expect("seeded balanced deal is valid")
    }

    #[test]
    fn intake_advances_freely() {
        let mut workflow = CaseWorkflow::default();
        let events = workflow.dispatch(WorkflowCommand::Advance);
        assert_eq!(workflow.step, WorkflowStep::Proposal);
        assert_eq!(events, vec![WorkflowEvent::StepChanged(WorkflowStep::Proposal)]);
    }

    #[test]
    fn proposal_step_blocks_until_a_proposal_is_recorded() {
        let mut workflow = CaseWorkflow::default();
        workflow.dispatch(WorkflowCommand::Advance);

        let blocked = workflow.dispatch(WorkflowCommand::Advance);
        assert_eq!(workflow.step, WorkflowStep::Proposal);
        assert_eq!(
            blocked,
            vec![WorkflowEvent::AdvanceBlocked(WorkflowStep::Proposal)]
        );

        let proposal = valid_proposal();
        workflow.dispatch(WorkflowCommand::RecordProposal(proposal));
        let advanced = workflow.dispatch(WorkflowCommand::Advance);
        assert_eq!(workflow.step, WorkflowStep::Contract);
        assert_eq!(
            advanced,
            vec![WorkflowEvent::StepChanged(WorkflowStep::Contract)]
        );
    }

    #[test]
    fn recorded_proposal_keeps_the_gate_open() {
        let mut workflow = CaseWorkflow::default();
        workflow.dispatch(WorkflowCommand::Advance);
        workflow.dispatch(WorkflowCommand::RecordProposal(valid_proposal()));

        // Going back and forward again does not re-demand a proposal.
        workflow.dispatch(WorkflowCommand::Advance);
        workflow.dispatch(WorkflowCommand::Back);
        assert_eq!(workflow.step, WorkflowStep::Proposal);
        assert!(workflow.can_advance());
    }

    #[test]
    fn back_saturates_at_intake_and_advance_stops_at_payment() {
        let mut workflow = CaseWorkflow::default();
        assert_eq!(workflow.dispatch(WorkflowCommand::Back), Vec::new());
        assert_eq!(workflow.step, WorkflowStep::Intake);

        workflow.dispatch(WorkflowCommand::Advance);
        workflow.dispatch(WorkflowCommand::RecordProposal(valid_proposal()));
        workflow.dispatch(WorkflowCommand::Advance);
        workflow.dispatch(WorkflowCommand::Advance);
        assert_eq!(workflow.step, WorkflowStep::Payment);

        assert_eq!(workflow.dispatch(WorkflowCommand::Advance), Vec::new());
        assert_eq!(workflow.step, WorkflowStep::Payment);
    }

    #[test]
    fn reset_returns_to_intake_and_drops_the_proposal() {
        let mut workflow = CaseWorkflow::default();
        workflow.dispatch(WorkflowCommand::Advance);
        workflow.dispatch(WorkflowCommand::RecordProposal(valid_proposal()));

        let events = workflow.dispatch(WorkflowCommand::Reset);
        assert_eq!(workflow, CaseWorkflow::default());
        assert_eq!(events, vec![WorkflowEvent::WorkflowReset]);
    }
}
