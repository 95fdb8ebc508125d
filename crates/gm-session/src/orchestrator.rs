//! The resolution orchestrator.
//!
//! Turns one [`Intent`] into dice, rule lookups, and ledger mutations.
//! Each resolution runs inside a single campaign transaction, so other
//! callers see either none of a beat's effects or all of them.
//!
//! Missing data never aborts a resolution: an unknown rating falls back to
//! the proposed pool, a missing target clock is created, and a missing
//! consequence entry yields no suggestions.

use std::sync::Arc;

use gm_ledger::{
    Campaign, CampaignHandle, Counter, LastRoll, Ledger, Modifiers, RollKind, Scope, TargetClock,
};
use gm_mechanics::rules::{infer_position_effect, suggest_consequences};
use gm_mechanics::{
    ActionOutcome, Effect, Inference, MAX_POOL, Position, Quality, ResistanceOutcome,
    action_outcome, fortune_outcome, resistance_outcome,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::intent::{ActionProposal, DowntimeProposal, Intent, RollProposal};
use crate::result::{
    ActionResult, ClockProgress, DowntimeAck, EngagementResult, FortuneResult, ResistResult,
    ToolResult,
};

/// Resolves intents against a shared ledger.
///
/// Holds no game state besides its RNG. Give each concurrent session its
/// own resolver over the same `Arc<Ledger>`.
#[derive(Debug)]
pub struct Resolver {
    ledger: Arc<Ledger>,
    config: SessionConfig,
    rng: StdRng,
}

impl Resolver {
    /// Create a resolver.
    pub fn new(ledger: Arc<Ledger>, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { ledger, config, rng }
    }

    /// The ledger this resolver writes to.
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Mutable access to the RNG, for plain rolls outside a resolution.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Resolve against the active campaign.
    pub fn resolve_active(&mut self, intent: &Intent, text: &str) -> SessionResult<ToolResult> {
        let campaign = self.ledger.active()?;
        self.resolve(&campaign, intent, text)
    }

    /// Resolve one intent as a single atomic step on `campaign`.
    ///
    /// `text` is the player's words, used only to infer a missing
    /// position or effect.
    pub fn resolve(
        &mut self,
        campaign: &CampaignHandle,
        intent: &Intent,
        text: &str,
    ) -> SessionResult<ToolResult> {
        let rng = &mut self.rng;
        let default_segments = self.config.default_clock_segments;
        let result = campaign.transact(|c| {
            Ok(match intent {
                Intent::ActionRoll(p) => {
                    let plan = plan_action(c, p, text);
                    let outcome = action_outcome(plan.pool, rng);
                    ToolResult::ActionRoll(settle_action(c, p, plan, outcome, default_segments))
                }
                Intent::Resist(p) => {
                    let outcome = resistance_outcome(p.pool(), rng);
                    ToolResult::Resistance(settle_resist(c, p, outcome))
                }
                Intent::Fortune(p) => ToolResult::Fortune(fortune(c, p, rng)),
                Intent::Engagement(p) => ToolResult::Engagement(engagement(c, p, rng)),
                Intent::Downtime(p) => ToolResult::DowntimeAck(downtime(c, p)),
            })
        })?;
        info!(
            campaign = campaign.name(),
            kind = intent.kind(),
            best = ?result.best(),
            quality = ?result.quality(),
            "beat resolved"
        );
        Ok(result)
    }

    /// Roll resistance for `actor` and charge the stress in one step.
    pub fn resist_apply(
        &mut self,
        campaign: &CampaignHandle,
        actor: &str,
        pool: i32,
    ) -> SessionResult<ResistResult> {
        let p = RollProposal {
            actor: Some(actor.to_string()),
            dice_guess: Some(pool),
            notes: None,
        };
        let rng = &mut self.rng;
        let result = campaign.transact(|c| {
            let outcome = resistance_outcome(p.pool(), rng);
            Ok(settle_resist(c, &p, outcome))
        })?;
        info!(
            campaign = campaign.name(),
            actor,
            stress_cost = result.stress_cost,
            "resistance applied"
        );
        Ok(result)
    }
}

/// Pool and framing of an action roll, before the dice.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ActionPlan {
    pub(crate) pool: i32,
    pub(crate) position: Option<Position>,
    pub(crate) effect: Option<Effect>,
    pub(crate) inferred: Option<Inference>,
    pub(crate) modifiers: Modifiers,
}

/// Fill framing gaps from the trigger table and size the pool.
pub(crate) fn plan_action(c: &Campaign, p: &ActionProposal, text: &str) -> ActionPlan {
    let mut position = p.position;
    let mut effect = p.effect;
    let mut inferred = None;
    if position.is_none() || effect.is_none() {
        inferred = infer_position_effect(text, &c.config.rules.triggers);
        if let Some(inf) = &inferred {
            position = position.or(Some(inf.position));
            effect = effect.or(Some(inf.effect));
        }
    }

    let base = rating(c, p).unwrap_or_else(|| {
        if p.actor.is_some() && p.action.is_some() {
            warn!(actor = ?p.actor, action = ?p.action, "no rating on file, using proposed pool");
        }
        p.guess()
    });
    let harm_penalty = p.actor.as_deref().map_or(0, |a| c.harm_penalty(a));
    let bonus = p.bonus.unwrap_or(0);
    let pool = base
        .saturating_add(bonus)
        .saturating_add(i32::from(p.assist))
        .saturating_add(i32::from(p.push))
        .saturating_add(i32::from(p.bargain))
        .saturating_sub(harm_penalty)
        .clamp(0, MAX_POOL);

    ActionPlan {
        pool,
        position,
        effect,
        inferred,
        modifiers: Modifiers {
            setup: p.setup,
            assist: p.assist,
            assist_actor: p.assist_actor.clone(),
            push: p.push,
            bargain: p.bargain,
            bonus,
            harm_penalty,
        },
    }
}

fn rating(c: &Campaign, p: &ActionProposal) -> Option<i32> {
    let actor = p.actor.as_deref()?;
    let action = p.action.as_deref()?;
    c.player(actor)?.rating(action)
}

/// Apply a rolled action outcome to the campaign.
pub(crate) fn settle_action(
    c: &mut Campaign,
    p: &ActionProposal,
    plan: ActionPlan,
    outcome: ActionOutcome,
    default_segments: u32,
) -> ActionResult {
    let effect = plan.effect.unwrap_or_default();
    let quality = outcome.quality;

    let clock = match &p.target_clock {
        Some(target) if quality.advances_clock() => {
            Some(advance_target(c, target, effect, default_segments))
        }
        _ => None,
    };

    let consequences = match plan.position {
        Some(position) if quality.has_consequences() => {
            suggest_consequences(position.label(), quality, &c.config.rules.consequences)
        }
        _ => Vec::new(),
    };

    if p.assist
        && let Some(helper) = &p.assist_actor
    {
        c.player_mut(helper).add_stress(1);
    }
    let failures = p.group_failures.unwrap_or(0);
    if p.group_action
        && failures > 0
        && let Some(leader) = &p.leader
    {
        c.player_mut(leader).add_stress(failures);
    }

    if c.config.house_rules.auto_rep_heat {
        match quality {
            Quality::Critical => c.adjust(Counter::Rep, 2),
            Quality::Full => c.adjust(Counter::Rep, 1),
            Quality::Partial => c.adjust(Counter::Heat, 1),
            Quality::Bad => c.adjust(Counter::Heat, 2),
        }
    }
    if c.config.house_rules.auto_xp_desperate
        && plan.position == Some(Position::Desperate)
        && let Some(actor) = &p.actor
    {
        c.add_player_xp(actor, 1);
    }
    // not gated by auto_rep_heat
    if quality == Quality::Critical {
        c.add_crew_xp(1);
    }

    let mut last = LastRoll::new(RollKind::Action);
    last.actor = p.actor.clone();
    last.action = p.action.clone();
    last.position = plan.position;
    last.effect = Some(effect);
    last.dice = Some(plan.pool);
    last.rolls = Some(outcome.rolls.clone());
    last.best = Some(outcome.best);
    last.quality = Some(quality);
    last.crit = Some(outcome.crit);
    last.modifiers = Some(plan.modifiers.clone());
    last.target_clock = p.target_clock.clone();
    last.notes = p.notes.clone();
    last.consequences = consequences.clone();
    c.last_roll = Some(last);

    ActionResult {
        dice: plan.pool,
        rolls: outcome.rolls,
        best: outcome.best,
        quality,
        crit: outcome.crit,
        actor: p.actor.clone(),
        action: p.action.clone(),
        position: plan.position,
        effect,
        inferred: plan.inferred,
        consequences,
        modifiers: plan.modifiers,
        clock,
    }
}

fn advance_target(
    c: &mut Campaign,
    target: &TargetClock,
    effect: Effect,
    default_segments: u32,
) -> ClockProgress {
    let ticked = effect.segments();
    let created = c.clock(&Scope::Campaign, &target.name).is_none();
    if created {
        let segments = target.segments.unwrap_or(default_segments);
        warn!(clock = %target.name, segments, "target clock missing, creating it");
        c.upsert_clock(&Scope::Campaign, &target.name, segments);
    }
    let filled = c
        .fill_clock(&Scope::Campaign, &target.name, ticked)
        .unwrap_or_default();
    let segments = c
        .clock(&Scope::Campaign, &target.name)
        .map_or(filled, |k| k.segments);
    ClockProgress {
        name: target.name.clone(),
        ticked,
        filled,
        segments,
        created,
    }
}

pub(crate) fn settle_resist(
    c: &mut Campaign,
    p: &RollProposal,
    outcome: ResistanceOutcome,
) -> ResistResult {
    if let Some(actor) = &p.actor {
        let cost = i32::try_from(outcome.stress_cost).unwrap_or(i32::MAX);
        c.player_mut(actor).add_stress(cost);
    }
    let mut last = LastRoll::new(RollKind::Resist);
    last.actor = p.actor.clone();
    last.dice = Some(p.pool());
    last.rolls = Some(outcome.rolls.clone());
    last.best = Some(outcome.best);
    last.stress_cost = Some(outcome.stress_cost);
    last.notes = p.notes.clone();
    c.last_roll = Some(last);

    ResistResult {
        dice: p.pool(),
        rolls: outcome.rolls,
        best: outcome.best,
        stress_cost: outcome.stress_cost,
        actor: p.actor.clone(),
    }
}

fn fortune(c: &mut Campaign, p: &RollProposal, rng: &mut StdRng) -> FortuneResult {
    let outcome = fortune_outcome(p.pool(), rng);
    c.last_roll = Some(graded_last_roll(RollKind::Fortune, p, &outcome));
    FortuneResult {
        dice: p.pool(),
        rolls: outcome.rolls,
        best: outcome.best,
        quality: outcome.quality,
        crit: outcome.crit,
    }
}

pub(crate) fn settle_engagement(
    c: &mut Campaign,
    p: &RollProposal,
    outcome: ActionOutcome,
) -> EngagementResult {
    let start = Position::from_engagement(outcome.best);
    let mut last = graded_last_roll(RollKind::Engagement, p, &outcome);
    last.start_position = Some(start);
    c.last_roll = Some(last);
    EngagementResult {
        dice: p.pool(),
        rolls: outcome.rolls,
        best: outcome.best,
        quality: outcome.quality,
        crit: outcome.crit,
        start_position: start,
    }
}

fn engagement(c: &mut Campaign, p: &RollProposal, rng: &mut StdRng) -> EngagementResult {
    let outcome = fortune_outcome(p.pool(), rng);
    settle_engagement(c, p, outcome)
}

fn graded_last_roll(kind: RollKind, p: &RollProposal, outcome: &ActionOutcome) -> LastRoll {
    let mut last = LastRoll::new(kind);
    last.actor = p.actor.clone();
    last.dice = Some(p.pool());
    last.rolls = Some(outcome.rolls.clone());
    last.best = Some(outcome.best);
    last.quality = Some(outcome.quality);
    last.crit = Some(outcome.crit);
    last.notes = p.notes.clone();
    last
}

fn downtime(c: &mut Campaign, p: &DowntimeProposal) -> DowntimeAck {
    let mut last = LastRoll::new(RollKind::Downtime);
    last.actor = p.actor.clone();
    last.notes = p.activity.clone().or_else(|| p.notes.clone());
    c.last_roll = Some(last);
    DowntimeAck {
        actor: p.actor.clone(),
        activity: p.activity.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use gm_ledger::{Harm, LedgerConfig};
    use gm_mechanics::Roll;
    use proptest::prelude::*;

    use super::*;

    fn outcome(values: &[u32]) -> ActionOutcome {
        ActionOutcome::grade(Roll::from_values(values.to_vec()), false)
    }

    fn rated(actor: &str, action: &str, rating: i32) -> Campaign {
        let mut c = Campaign::default();
        c.player_mut(actor).actions.insert(action.to_string(), rating);
        c
    }

    fn proposal(actor: &str, action: &str) -> ActionProposal {
        ActionProposal {
            actor: Some(actor.into()),
            action: Some(action.into()),
            ..ActionProposal::default()
        }
    }

    fn settle(c: &mut Campaign, p: &ActionProposal, text: &str, values: &[u32]) -> ActionResult {
        let plan = plan_action(c, p, text);
        settle_action(c, p, plan, outcome(values), 4)
    }

    #[test]
    fn pool_adds_modifiers_and_subtracts_harm() {
        let mut c = rated("Anna", "Prowl", 2);
        c.player_mut("Anna").harms.push(Harm::new(2, "Cut", None));
        let p = ActionProposal {
            bonus: Some(1),
            assist: true,
            push: true,
            bargain: true,
            ..proposal("Anna", "Prowl")
        };
        let plan = plan_action(&c, &p, "");
        assert_eq!(plan.pool, 2 + 1 + 1 + 1 + 1 - 1);
        assert_eq!(plan.modifiers.harm_penalty, 1);
    }

    #[test]
    fn severe_harm_drops_pool_to_zero() {
        let mut c = rated("Anna", "Skirmish", 2);
        c.player_mut("Anna").harms.push(Harm::new(3, "Shot", None));
        let plan = plan_action(&c, &proposal("Anna", "Skirmish"), "");
        assert_eq!(plan.pool, 0);

        let mut rng = StdRng::seed_from_u64(3);
        let out = action_outcome(plan.pool, &mut rng);
        assert_eq!(out.rolls.count(), 2);
        assert_eq!(out.best, out.rolls.lowest());
    }

    proptest! {
        #[test]
        fn pool_is_floored_sum(
            rating in 0i32..5,
            bonus in -5i32..5,
            assist in any::<bool>(),
            push in any::<bool>(),
            bargain in any::<bool>(),
            harm in 0u8..=3,
        ) {
            let mut c = rated("Anna", "Hunt", rating);
            if harm > 0 {
                c.player_mut("Anna").harms.push(Harm::new(harm, "Hurt", None));
            }
            let p = ActionProposal {
                bonus: Some(bonus),
                assist,
                push,
                bargain,
                ..proposal("Anna", "Hunt")
            };
            let penalty = match harm {
                3 => 2,
                2 => 1,
                _ => 0,
            };
            let expected = (rating + bonus + i32::from(assist) + i32::from(push)
                + i32::from(bargain)
                - penalty)
                .max(0);
            prop_assert_eq!(plan_action(&c, &p, "").pool, expected);
        }
    }

    #[test]
    fn unknown_rating_uses_guess() {
        let c = Campaign::default();
        let p = ActionProposal {
            dice_guess: Some(3),
            ..proposal("Ghost", "Attune")
        };
        assert_eq!(plan_action(&c, &p, "").pool, 3);
        assert_eq!(plan_action(&c, &ActionProposal::default(), "").pool, 1);
    }

    #[test]
    fn pool_is_capped() {
        let mut c = rated("Anna", "Wreck", 4);
        let p = ActionProposal {
            bonus: Some(i32::MAX),
            ..proposal("Anna", "Wreck")
        };
        assert_eq!(plan_action(&c, &p, "").pool, MAX_POOL);
        c.player_mut("Anna").actions.insert("Wreck".into(), 1000);
        assert_eq!(plan_action(&c, &proposal("Anna", "Wreck"), "").pool, MAX_POOL);
    }

    #[test]
    fn pool_never_negative() {
        let c = Campaign::default();
        let p = ActionProposal {
            dice_guess: Some(0),
            bonus: Some(-4),
            ..ActionProposal::default()
        };
        assert_eq!(plan_action(&c, &p, "").pool, 0);
    }

    #[test]
    fn triggers_fill_gaps_only() {
        let c = Campaign::default();
        let p = ActionProposal {
            position: Some(Position::Controlled),
            ..ActionProposal::default()
        };
        let plan = plan_action(&c, &p, "We perform the RITUAL at midnight");
        assert_eq!(plan.position, Some(Position::Controlled));
        assert_eq!(plan.effect, Some(Effect::High));
        assert!(plan.inferred.is_some());

        let plan = plan_action(&c, &ActionProposal::default(), "nothing matches here");
        assert_eq!(plan.position, None);
        assert_eq!(plan.effect, None);
    }

    #[test]
    fn critical_awards_rep_and_crew_xp() {
        let mut c = rated("Anna", "Prowl", 2);
        let r = settle(&mut c, &proposal("Anna", "Prowl"), "", &[6, 6]);
        assert_eq!(r.quality, Quality::Critical);
        assert_eq!(c.rep, 2);
        assert_eq!(c.crew.xp, 1);
        assert!(r.consequences.is_empty());
    }

    #[test]
    fn crew_xp_on_critical_ignores_rep_heat_toggle() {
        let mut c = rated("Anna", "Prowl", 2);
        c.config.house_rules.auto_rep_heat = false;
        settle(&mut c, &proposal("Anna", "Prowl"), "", &[6, 6, 2]);
        assert_eq!(c.rep, 0);
        assert_eq!(c.crew.xp, 1);
    }

    #[test]
    fn partial_and_bad_add_heat_and_suggest() {
        let mut c = rated("Anna", "Prowl", 1);
        let p = ActionProposal {
            position: Some(Position::Risky),
            ..proposal("Anna", "Prowl")
        };
        let r = settle(&mut c, &p, "", &[4]);
        assert_eq!(r.quality, Quality::Partial);
        assert_eq!(c.heat, 1);
        assert!(!r.consequences.is_empty());
        assert_eq!(
            c.last_roll.as_ref().map(|l| l.consequences.clone()),
            Some(r.consequences.clone())
        );

        let r = settle(&mut c, &p, "", &[2]);
        assert_eq!(r.quality, Quality::Bad);
        assert_eq!(c.heat, 3);
    }

    #[test]
    fn no_suggestions_without_position() {
        let mut c = Campaign::default();
        let r = settle(&mut c, &ActionProposal::default(), "", &[1]);
        assert!(r.consequences.is_empty());
    }

    #[test]
    fn desperate_rolls_grant_xp() {
        let mut c = rated("Anna", "Wreck", 1);
        let p = ActionProposal {
            position: Some(Position::Desperate),
            ..proposal("Anna", "Wreck")
        };
        settle(&mut c, &p, "", &[6]);
        assert_eq!(c.player("Anna").map(|a| a.xp), Some(1));

        c.config.house_rules.auto_xp_desperate = false;
        settle(&mut c, &p, "", &[6]);
        assert_eq!(c.player("Anna").map(|a| a.xp), Some(1));
    }

    #[test]
    fn target_clock_is_created_and_filled() {
        let mut c = Campaign::default();
        let p = ActionProposal {
            effect: Some(Effect::High),
            target_clock: Some(TargetClock {
                name: "Vault".into(),
                segments: None,
            }),
            ..ActionProposal::default()
        };
        let r = settle(&mut c, &p, "", &[5]);
        let clock = r.clock.unwrap();
        assert!(clock.created);
        assert_eq!((clock.filled, clock.segments), (3, 4));

        let r = settle(&mut c, &p, "", &[6]);
        let clock = r.clock.unwrap();
        assert!(!clock.created);
        assert_eq!(clock.filled, 4);
    }

    #[test]
    fn bad_roll_leaves_clock_alone() {
        let mut c = Campaign::default();
        let p = ActionProposal {
            target_clock: Some(TargetClock {
                name: "Vault".into(),
                segments: Some(6),
            }),
            ..ActionProposal::default()
        };
        let r = settle(&mut c, &p, "", &[3]);
        assert!(r.clock.is_none());
        assert!(c.clock(&Scope::Campaign, "Vault").is_none());
    }

    #[test]
    fn assist_and_group_stress() {
        let mut c = Campaign::default();
        let p = ActionProposal {
            assist: true,
            assist_actor: Some("Bex".into()),
            group_action: true,
            leader: Some("Cole".into()),
            group_failures: Some(2),
            ..ActionProposal::default()
        };
        settle(&mut c, &p, "", &[5]);
        assert_eq!(c.player("Bex").map(|b| b.stress), Some(1));
        assert_eq!(c.player("Cole").map(|b| b.stress), Some(2));
    }

    #[test]
    fn last_roll_records_the_beat() {
        let mut c = rated("Anna", "Sway", 2);
        let p = ActionProposal {
            setup: true,
            ..proposal("Anna", "Sway")
        };
        settle(&mut c, &p, "", &[4, 1]);
        let last = c.last_roll.unwrap();
        assert_eq!(last.kind, RollKind::Action);
        assert_eq!(last.dice, Some(2));
        assert_eq!(last.best, Some(4));
        assert_eq!(last.effect, Some(Effect::Standard));
        assert!(last.modifiers.unwrap().setup);
    }

    #[test]
    fn resist_charges_stress_with_overflow() {
        let mut c = Campaign::default();
        c.player_mut("Anna").set_stress(8);
        let p = RollProposal {
            actor: Some("Anna".into()),
            dice_guess: Some(1),
            notes: None,
        };
        let r = settle_resist(&mut c, &p, ResistanceOutcome::grade(Roll::from_values(vec![3])));
        assert_eq!(r.stress_cost, 3);
        let anna = c.player("Anna").unwrap();
        assert_eq!((anna.stress, anna.pending_trauma), (0, 1));
        assert_eq!(c.last_roll.unwrap().stress_cost, Some(3));
    }

    #[test]
    fn engagement_best_four_starts_risky() {
        let mut c = Campaign::default();
        let r = settle_engagement(&mut c, &RollProposal::default(), outcome(&[4, 2]));
        assert_eq!(r.start_position, Position::Risky);
        assert_eq!(
            c.last_roll.unwrap().start_position,
            Some(Position::Risky)
        );
    }

    #[test]
    fn downtime_only_acknowledges() {
        let mut c = Campaign::default();
        let before = c.clone();
        let ack = downtime(
            &mut c,
            &DowntimeProposal {
                actor: Some("Anna".into()),
                activity: Some("Indulge vice".into()),
                notes: None,
            },
        );
        assert_eq!(ack.activity.as_deref(), Some("Indulge vice"));
        let last = c.last_roll.take().unwrap();
        assert_eq!(last.kind, RollKind::Downtime);
        assert!(last.rolls.is_none());
        assert_eq!(c, before);
    }

    #[test]
    fn resolver_runs_every_kind() {
        let ledger = Arc::new(Ledger::open(&LedgerConfig::default()).unwrap());
        let mut resolver = Resolver::new(Arc::clone(&ledger), SessionConfig::default().with_seed(7));
        let intents = [
            Intent::ActionRoll(ActionProposal::default()),
            Intent::Resist(RollProposal::default()),
            Intent::Fortune(RollProposal::default()),
            Intent::Engagement(RollProposal::default()),
            Intent::Downtime(DowntimeProposal::default()),
        ];
        for intent in &intents {
            let result = resolver.resolve_active(intent, "").unwrap();
            let last = ledger.active().unwrap().snapshot().last_roll.unwrap();
            let expected = match result {
                ToolResult::ActionRoll(_) => RollKind::Action,
                ToolResult::Resistance(_) => RollKind::Resist,
                ToolResult::Fortune(_) => RollKind::Fortune,
                ToolResult::Engagement(_) => RollKind::Engagement,
                ToolResult::DowntimeAck(_) => RollKind::Downtime,
            };
            assert_eq!(last.kind, expected);
        }
    }

    #[test]
    fn oversized_fortune_draws_a_capped_pool() {
        let ledger = Arc::new(Ledger::open(&LedgerConfig::default()).unwrap());
        let mut resolver = Resolver::new(Arc::clone(&ledger), SessionConfig::default().with_seed(5));
        let intent = Intent::from_value(&serde_json::json!({
            "intent": "fortune_roll",
            "proposed": {"dice_guess": "20000000"}
        }))
        .unwrap()
        .unwrap();
        let ToolResult::Fortune(result) = resolver.resolve_active(&intent, "").unwrap() else {
            panic!("expected fortune");
        };
        assert_eq!(result.dice, MAX_POOL);
        assert_eq!(result.rolls.count(), MAX_POOL as usize);
        let last = ledger.active().unwrap().snapshot().last_roll.unwrap();
        assert_eq!(last.dice, Some(MAX_POOL));
        assert_eq!(last.rolls.map(|r| r.count()), Some(MAX_POOL as usize));
    }

    #[test]
    fn seeded_resolvers_agree() {
        let ledger = Arc::new(Ledger::open(&LedgerConfig::default()).unwrap());
        let intent = Intent::Fortune(RollProposal {
            dice_guess: Some(4),
            ..RollProposal::default()
        });
        let mut a = Resolver::new(Arc::clone(&ledger), SessionConfig::default().with_seed(11));
        let mut b = Resolver::new(Arc::clone(&ledger), SessionConfig::default().with_seed(11));
        assert_eq!(
            a.resolve_active(&intent, "").unwrap(),
            b.resolve_active(&intent, "").unwrap()
        );
    }

    #[test]
    fn concurrent_beats_keep_counters_and_last_roll_consistent() {
        let ledger = Arc::new(Ledger::open(&LedgerConfig::default()).unwrap());
        ledger
            .active()
            .unwrap()
            .transact(|c| {
                c.config.house_rules.auto_xp_desperate = false;
                Ok(())
            })
            .unwrap();
        let workers: Vec<_> = (0..4u64)
            .map(|seed| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    let mut resolver =
                        Resolver::new(ledger, SessionConfig::default().with_seed(seed));
                    let mut expected = (0, 0);
                    for _ in 0..25 {
                        let intent = Intent::ActionRoll(ActionProposal {
                            dice_guess: Some(2),
                            ..ActionProposal::default()
                        });
                        let r = resolver.resolve_active(&intent, "").unwrap();
                        match r.quality() {
                            Some(Quality::Critical) => expected.0 += 2,
                            Some(Quality::Full) => expected.0 += 1,
                            Some(Quality::Partial) => expected.1 += 1,
                            _ => expected.1 += 2,
                        }
                    }
                    expected
                })
            })
            .collect();
        let (mut rep, mut heat) = (0, 0);
        for w in workers {
            let (r, h) = w.join().unwrap();
            rep += r;
            heat += h;
        }
        let c = ledger.active().unwrap().snapshot();
        assert_eq!((c.rep, c.heat), (rep, heat));
        assert_eq!(c.last_roll.map(|l| l.kind), Some(RollKind::Action));
    }
}
