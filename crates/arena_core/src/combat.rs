//! Damage resolution for 1v1 and team exchanges, consumable pickups and the
//! victory check.

use serde::Serialize;
use tracing::trace;

use crate::combatant::{Attack, AttackKind, Combatant};
use crate::config::Window;
use crate::context::RoundContext;
use crate::observer::{Cue, Notice};
use crate::team::{Side, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleExchange {
    pub attacker: Side,
    pub attack: Attack,
    pub healed: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamExchange {
    pub attacks: u32,
    pub eliminated: Vec<u32>,
    /// `(fighter id, amount)` of the post-sweep pickup.
    pub healed: Option<(u32, u32)>,
}

/// Resolves one 1v1 round. The upper half of the round draw lets `first`
/// strike; the same draw then decides whether the striker finds a pickup.
pub fn process_single_combat(
    first: &mut Combatant,
    second: &mut Combatant,
    draw: i64,
    ctx: &mut RoundContext<'_>,
) -> SingleExchange {
    let pivot = ctx.config.draws.single_round / 2;
    let windows = ctx.config.consumables.single.clone();
    if draw > pivot {
        let attack = strike(first, second, ctx);
        let healed = try_consume_item(first, draw, windows.attacker, ctx);
        SingleExchange {
            attacker: Side::One,
            attack,
            healed,
        }
    } else {
        let attack = strike(second, first, ctx);
        let healed = try_consume_item(second, draw, windows.defender, ctx);
        SingleExchange {
            attacker: Side::Two,
            attack,
            healed,
        }
    }
}

fn strike(striker: &Combatant, target: &mut Combatant, ctx: &mut RoundContext<'_>) -> Attack {
    let attack = striker.hit(ctx.rng, ctx.config);
    report_attack(striker, target, attack, ctx);
    target.take_damage(attack.damage);
    attack
}

fn report_attack(
    striker: &Combatant,
    target: &Combatant,
    attack: Attack,
    ctx: &mut RoundContext<'_>,
) {
    ctx.observer.notice(&Notice::Attack {
        attacker: striker.name.clone(),
        kind: attack.kind,
        damage: attack.damage,
        missed: attack.missed,
    });
    let cue = match (attack.missed, attack.kind) {
        (true, _) => Cue::Miss {
            fighter_id: striker.id,
        },
        (false, AttackKind::Normal) => Cue::Hit {
            fighter_id: target.id,
            damage: attack.damage,
        },
        (false, AttackKind::Special) => Cue::Special {
            fighter_id: target.id,
            damage: attack.damage,
        },
    };
    ctx.observer.cue(cue);
}

/// Heals `fighter` by a drawn consumable when `draw` falls inside `window`.
/// The 1v1 pickup is not capped at max health.
pub fn try_consume_item(
    fighter: &mut Combatant,
    draw: i64,
    window: Window,
    ctx: &mut RoundContext<'_>,
) -> Option<u32> {
    if !window.contains(draw) {
        return None;
    }
    let consumable = ctx.consumables.draw(ctx.rng)?;
    let amount = consumable.heal_amount();
    fighter.heal(amount);
    ctx.observer.notice(&Notice::Consumed {
        fighter: fighter.name.clone(),
        item: consumable.name,
        amount,
    });
    ctx.observer.cue(Cue::Heal {
        fighter_id: fighter.id,
        amount,
    });
    Some(amount)
}

/// Every member of `attacking` strikes a random surviving member of
/// `defending`. Defenders dropping to zero are removed on the spot, so later
/// strikes in the same sweep only land on survivors.
pub fn process_team_combat(
    attacking: &mut Team,
    defending: &mut Team,
    ctx: &mut RoundContext<'_>,
) -> TeamExchange {
    let mut exchange = TeamExchange::default();

    for idx in 0..attacking.len() {
        if defending.is_empty() {
            break;
        }
        let target_idx = ctx.rng.pick_index(defending.len());
        let striker = &attacking.fighters()[idx];
        let attack = striker.hit(ctx.rng, ctx.config);
        exchange.attacks += 1;

        let Some(target) = defending.get_mut(target_idx) else {
            continue;
        };
        ctx.observer.notice(&Notice::Target {
            attacker: striker.name.clone(),
            defender: target.name.clone(),
        });
        report_attack(striker, target, attack, ctx);
        target.take_damage(attack.damage);
        trace!(
            target: "arena.combat",
            attacker = striker.id,
            defender = target.id,
            damage = attack.damage,
            health = target.health,
            "team strike"
        );

        if target.is_defeated() {
            if let Some(fallen) = defending.remove_at(target_idx) {
                ctx.observer.notice(&Notice::Eliminated {
                    fighter: fallen.name,
                    team: defending.name.clone(),
                });
                exchange.eliminated.push(fallen.id);
            }
        }
    }

    let roll = ctx
        .rng
        .random_int(0, ctx.config.draws.team_consumable_roll);
    if ctx.config.consumables.team.chance.contains(roll) && !attacking.is_empty() {
        exchange.healed = team_pickup(attacking, ctx);
    }

    exchange
}

fn team_pickup(team: &mut Team, ctx: &mut RoundContext<'_>) -> Option<(u32, u32)> {
    let consumable = ctx.consumables.draw(ctx.rng)?;
    let idx = ctx.rng.pick_index(team.len());
    let fighter = team.get_mut(idx)?;
    let amount = consumable.heal_amount();
    fighter.heal_capped(amount);
    ctx.observer.notice(&Notice::Consumed {
        fighter: fighter.name.clone(),
        item: consumable.name,
        amount,
    });
    ctx.observer.cue(Cue::Heal {
        fighter_id: fighter.id,
        amount,
    });
    Some((fighter.id, amount))
}

/// The two sides of a match, as seen by the victory check.
#[derive(Debug, Clone, Copy)]
pub enum Contest<'a> {
    Single(&'a Combatant, &'a Combatant),
    Teams(&'a Team, &'a Team),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Victory {
    pub side: Side,
    pub winner: String,
    pub is_team: bool,
}

/// Declares a winner once one side is out: an empty team, or a fighter at
/// zero health or below. Side one is checked first, so a double knockout
/// goes to side two.
pub fn check_victory_condition(contest: Contest<'_>) -> Option<Victory> {
    match contest {
        Contest::Teams(one, two) => {
            let side = if one.is_defeated() {
                Side::Two
            } else if two.is_defeated() {
                Side::One
            } else {
                return None;
            };
            let winner = match side {
                Side::One => &one.name,
                Side::Two => &two.name,
            };
            Some(Victory {
                side,
                winner: winner.clone(),
                is_team: true,
            })
        }
        Contest::Single(one, two) => {
            let side = if one.is_defeated() {
                Side::Two
            } else if two.is_defeated() {
                Side::One
            } else {
                return None;
            };
            let winner = match side {
                Side::One => &one.name,
                Side::Two => &two.name,
            };
            Some(Victory {
                side,
                winner: winner.clone(),
                is_team: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::consumable::{Consumable, ConsumableTable};
    use crate::observer::RecordingObserver;
    use crate::rng::{ScriptedRng, SimulationRng};

    struct Harness {
        cfg: ArenaConfig,
        table: ConsumableTable,
        log: RecordingObserver,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                cfg: ArenaConfig::default(),
                table: ConsumableTable::new(vec![Consumable::new("Health Potion", 50)]),
                log: RecordingObserver::new(),
            }
        }

        fn ctx<'a>(&'a mut self, rng: &'a mut dyn crate::rng::RandomSource) -> RoundContext<'a> {
            RoundContext::new(rng, &self.table, &mut self.log, &self.cfg)
        }
    }

    #[test]
    fn upper_draw_lets_first_fighter_strike() {
        let mut h = Harness::new();
        let mut a = Combatant::new(1, "Gosho", 400, 10);
        let mut b = Combatant::new(2, "Ivan", 300, 20);
        // type 50 (normal), hit 50, bonus 12 -> ceil(4 + 12) = 16
        let mut rng = ScriptedRng::new([50, 50, 12]);
        let ex = process_single_combat(&mut a, &mut b, 150, &mut h.ctx(&mut rng));
        assert_eq!(Side::One, ex.attacker);
        assert_eq!(16, ex.attack.damage);
        assert_eq!(284, b.health);
        assert_eq!(400, a.health);
        // 150 is inside (149, 160): the attacker finds a potion, uncapped
        assert_eq!(Some(50), ex.healed);
        assert_eq!(450, a.health);
    }

    #[test]
    fn lower_draw_lets_second_fighter_strike() {
        let mut h = Harness::new();
        let mut a = Combatant::new(1, "Gosho", 400, 10);
        let mut b = Combatant::new(2, "Ivan", 300, 20);
        let mut rng = ScriptedRng::new([50, 50, 0]);
        let ex = process_single_combat(&mut a, &mut b, 100, &mut h.ctx(&mut rng));
        assert_eq!(Side::Two, ex.attacker);
        assert_eq!(8, ex.attack.damage);
        assert_eq!(392, a.health);
        assert_eq!(None, ex.healed);
    }

    #[test]
    fn missed_attack_leaves_defender_untouched() {
        let mut h = Harness::new();
        let mut a = Combatant::new(1, "Gosho", 400, 10);
        let mut b = Combatant::new(2, "Ivan", 300, 20);
        let mut rng = ScriptedRng::new([50, 3]);
        let ex = process_single_combat(&mut a, &mut b, 180, &mut h.ctx(&mut rng));
        assert!(ex.attack.missed);
        assert_eq!(0, ex.attack.damage);
        assert_eq!(300, b.health);
        assert!(matches!(h.log.cues()[0], Cue::Miss { fighter_id: 1 }));
    }

    #[test]
    fn lone_defender_at_one_hp_is_eliminated() {
        let mut h = Harness::new();
        let mut attackers = Team::new(
            "Team One",
            vec![
                Combatant::new(1, "Gosho", 400, 10),
                Combatant::new(2, "Ivan", 300, 20),
                Combatant::new(3, "Petar", 350, 11),
            ],
        );
        let mut defenders = Team::new("Team Two", vec![Combatant::new(4, "Jivko", 1, 4)]);
        h.cfg.combat.miss_chance = 0;
        for seed in 0..25 {
            let mut a = attackers.clone();
            let mut d = defenders.clone();
            let mut rng = SimulationRng::new(seed);
            let ex = process_team_combat(&mut a, &mut d, &mut h.ctx(&mut rng));
            assert!(d.is_empty(), "seed {seed}");
            assert_eq!(vec![4], ex.eliminated);
            assert_eq!(3, a.len());
        }

        // first two swings miss, the third lands
        h.cfg.combat.miss_chance = 10;
        let mut rng = ScriptedRng::new([0, 50, 0, 0, 50, 0, 0, 50, 50, 0, 0]);
        let ex = process_team_combat(&mut attackers, &mut defenders, &mut h.ctx(&mut rng));
        assert_eq!(3, ex.attacks);
        assert!(defenders.is_defeated());
    }

    #[test]
    fn struck_member_is_removed_even_when_ids_collide() {
        let mut h = Harness::new();
        let mut attackers = Team::new("Team One", vec![Combatant::new(1, "Gosho", 400, 10)]);
        let mut defenders = Team::new(
            "Team Two",
            vec![
                Combatant::new(7, "Healthy", 500, 4),
                Combatant::new(7, "Frail", 1, 4),
            ],
        );
        // target 1, normal, hit, bonus 0 -> 4 damage; consumable roll 0
        let mut rng = ScriptedRng::new([1, 50, 50, 0, 0]);
        let ex = process_team_combat(&mut attackers, &mut defenders, &mut h.ctx(&mut rng));
        assert_eq!(vec![7], ex.eliminated);
        let survivors: Vec<_> = defenders
            .fighters()
            .iter()
            .map(|f| (f.name.as_str(), f.health))
            .collect();
        assert_eq!(vec![("Healthy", 500)], survivors);
    }

    #[test]
    fn sweep_stops_once_defenders_are_gone() {
        let mut h = Harness::new();
        let mut attackers = Team::new(
            "Team One",
            vec![
                Combatant::new(1, "Gosho", 400, 10),
                Combatant::new(2, "Ivan", 300, 20),
            ],
        );
        let mut defenders = Team::new("Team Two", vec![Combatant::new(3, "Jivko", 1, 4)]);
        // target 0, normal, hit, bonus 0 -> kill; then consumable roll 0
        let mut rng = ScriptedRng::new([0, 50, 50, 0, 0]);
        let ex = process_team_combat(&mut attackers, &mut defenders, &mut h.ctx(&mut rng));
        assert_eq!(1, ex.attacks);
        assert_eq!(0, rng.remaining());
        assert!(ex.healed.is_none());
    }

    #[test]
    fn team_pickup_is_capped_at_max_health() {
        let mut h = Harness::new();
        let mut wounded = Combatant::new(1, "Gosho", 400, 10);
        wounded.health = 380;
        let mut attackers = Team::new("Team One", vec![wounded]);
        let mut defenders = Team::new("Team Two", vec![Combatant::new(2, "Jivko", 600, 4)]);
        // target, type, miss; consumable roll 70; potion idx 0; fighter idx 0
        let mut rng = ScriptedRng::new([0, 50, 0, 70, 0, 0]);
        let ex = process_team_combat(&mut attackers, &mut defenders, &mut h.ctx(&mut rng));
        assert_eq!(Some((1, 50)), ex.healed);
        assert_eq!(400, attackers.fighters()[0].health);
    }

    #[test]
    fn team_membership_never_grows() {
        let mut h = Harness::new();
        let roster = |base: u32| {
            (0..4)
                .map(|i| Combatant::new(base + i, format!("F{}", base + i), 60, 30))
                .collect::<Vec<_>>()
        };
        let mut one = Team::new("Team One", roster(1));
        let mut two = Team::new("Team Two", roster(10));
        let mut rng = SimulationRng::new(99);
        let mut sizes = vec![(one.len(), two.len())];
        for round in 0..200 {
            if one.is_empty() || two.is_empty() {
                break;
            }
            if round % 2 == 0 {
                process_team_combat(&mut one, &mut two, &mut h.ctx(&mut rng));
            } else {
                process_team_combat(&mut two, &mut one, &mut h.ctx(&mut rng));
            }
            sizes.push((one.len(), two.len()));
        }
        for pair in sizes.windows(2) {
            assert!(pair[1].0 <= pair[0].0);
            assert!(pair[1].1 <= pair[0].1);
        }
        assert!(check_victory_condition(Contest::Teams(&one, &two)).is_some());
    }

    #[test]
    fn victory_only_when_a_side_is_out() {
        let alive = Combatant::new(1, "Gosho", 1, 10);
        let dead = Combatant::new(2, "Ivan", 0, 20);
        assert!(check_victory_condition(Contest::Single(&alive, &alive)).is_none());

        let v = check_victory_condition(Contest::Single(&alive, &dead)).unwrap();
        assert_eq!(Side::One, v.side);
        assert_eq!("Gosho", v.winner);
        assert!(!v.is_team);

        let both = check_victory_condition(Contest::Single(&dead, &dead)).unwrap();
        assert_eq!(Side::Two, both.side);

        let full = Team::new("Team One", vec![alive.clone()]);
        let empty = Team::new("Team Two", Vec::new());
        assert!(check_victory_condition(Contest::Teams(&full, &full)).is_none());
        let v = check_victory_condition(Contest::Teams(&empty, &full)).unwrap();
        assert_eq!("Team One", v.winner);
        assert!(v.is_team);
    }
}
