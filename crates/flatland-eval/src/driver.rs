//! The single-episode evaluation driver.
//!
//! [`evaluate`] runs one policy through one full episode in lockstep:
//! each tick advances resource cooldowns, assembles a percept, asks
//! the policy for a control, and applies the resolved command to the
//! world. The loop exits on the first terminal condition the episode
//! reports, or early with [`EvalError::Cancelled`] when the context's
//! cancel token fires.

use flatland_core::{EvalError, Policy};
use flatland_obs::percept;
use flatland_world::{Episode, Layout, Mode, TerminalReason};

use crate::context::EvalContext;
use crate::fitness;
use crate::trace::{self, Trace};

/// The result of one evaluation: fitness, why the episode ended, and
/// the diagnostic trace.
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// Composite fitness in `[0.0, 1.4]`.
    pub fitness: f32,
    /// Why the episode ended.
    pub terminal: TerminalReason,
    /// Structured diagnostics for the episode.
    pub trace: Trace,
}

/// Run `policy` through one episode of `mode`'s layout.
///
/// Cancellation is checked once per tick, before the policy is
/// consulted; a token cancelled mid-episode loses that episode's
/// partial progress. Policy failures abort the evaluation and surface
/// as [`EvalError::Policy`].
pub fn evaluate<P>(mode: Mode, ctx: &EvalContext, policy: &mut P) -> Result<Evaluation, EvalError>
where
    P: Policy + ?Sized,
{
    let layout = Layout::resolve(mode, &ctx.agent_id)?;
    if layout.max_age == 0 {
        return Ok(Evaluation {
            fitness: 0.0,
            terminal: TerminalReason::AgeLimit,
            trace: trace::zeroed(),
        });
    }

    let mut episode = Episode::new(&layout);
    let (terminal, last_percept, surface) = loop {
        if ctx.cancel.is_cancelled() {
            return Err(EvalError::Cancelled);
        }
        episode.advance_respawns();
        let p = percept(&episode);
        let control = policy.decide(&p)?;
        if let Some(reason) = episode.step(control.resolve()) {
            break (reason, p, control.surface());
        }
    };

    let trace = trace::build(&episode, terminal, &last_percept, surface);
    Ok(Evaluation {
        fitness: fitness::score(&episode, terminal),
        terminal,
        trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CancelToken;
    use crate::policy::DirectPolicy;
    use crate::trace::TraceValue;
    use crate::fitness::FITNESS_MAX;
    use flatland_core::{Control, PolicyError};
    use flatland_test_utils::{FailingPolicy, StationaryPolicy};

    fn ctx(agent_id: &str) -> EvalContext {
        EvalContext::new(agent_id)
    }

    #[test]
    fn stationary_policy_completes_an_episode() {
        let eval = evaluate(Mode::Gt, &ctx(""), &mut StationaryPolicy).unwrap();
        assert!(eval.fitness >= 0.0 && eval.fitness <= FITNESS_MAX);
        // an idle agent never reaches the forage goal
        assert_ne!(eval.terminal, TerminalReason::ForageGoal);
        assert_eq!(eval.trace["control_surface"], TraceValue::Text("scalar".into()));
    }

    #[test]
    fn trace_age_matches_terminal() {
        let eval = evaluate(Mode::Validation, &ctx(""), &mut StationaryPolicy).unwrap();
        match eval.trace["age"] {
            TraceValue::Count(age) => assert!(age > 0),
            ref other => panic!("age should be a count, got {other:?}"),
        }
    }

    #[test]
    fn pre_cancelled_token_aborts_before_the_first_tick() {
        let token = CancelToken::new();
        token.cancel();
        let ctx = EvalContext::new("").with_cancel(token);
        let err = evaluate(Mode::Gt, &ctx, &mut StationaryPolicy).unwrap_err();
        assert!(matches!(err, EvalError::Cancelled));
    }

    #[test]
    fn policy_failure_surfaces_as_policy_error() {
        let mut policy = FailingPolicy::after(3);
        let err = evaluate(Mode::Gt, &ctx(""), &mut policy).unwrap_err();
        assert!(matches!(err, EvalError::Policy(_)));
    }

    #[test]
    fn benchmark_mode_requires_an_agent_id() {
        let err = evaluate(Mode::Benchmark, &ctx(""), &mut StationaryPolicy).unwrap_err();
        assert!(matches!(err, EvalError::Config(_)));
    }

    #[test]
    fn differential_surface_is_recorded() {
        let mut policy = DirectPolicy::new(|_p: &[f32]| {
            Ok::<_, PolicyError>(Control::Drive {
                left: 0.0,
                right: 0.0,
            })
        });
        let eval = evaluate(Mode::Gt, &ctx(""), &mut policy).unwrap();
        assert_eq!(
            eval.trace["control_surface"],
            TraceValue::Text("differential".into())
        );
        assert_eq!(eval.trace["control_width"], TraceValue::Count(2));
    }

    #[test]
    fn identical_runs_are_identical() {
        let a = evaluate(Mode::Test, &ctx(""), &mut StationaryPolicy).unwrap();
        let b = evaluate(Mode::Test, &ctx(""), &mut StationaryPolicy).unwrap();
        assert_eq!(a.fitness, b.fitness);
        assert_eq!(a.trace, b.trace);
    }
}
