//! Player statistics arrangement for the scorecard view.

use crate::persistence::models::PlayerStat;

/// Group label for players without a team.
pub const INDIVIDUAL: &str = "Individual";

/// Players of one team, in position order.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGroup<'a> {
    /// Team name, or [`INDIVIDUAL`].
    pub team: &'a str,
    /// The team's players.
    pub players: Vec<&'a PlayerStat>,
}

/// Groups stat lines by team. Teams keep the order in which they first
/// appear; players within a team follow [`order_by_position`].
#[must_use]
pub fn group_by_team(stats: &[PlayerStat]) -> Vec<TeamGroup<'_>> {
    let mut groups: Vec<TeamGroup<'_>> = Vec::new();
    for stat in stats {
        let team = stat.team_name.as_deref().unwrap_or(INDIVIDUAL);
        match groups.iter_mut().find(|group| group.team == team) {
            Some(group) => group.players.push(stat),
            None => groups.push(TeamGroup {
                team,
                players: vec![stat],
            }),
        }
    }
    for group in &mut groups {
        sort_by_position(&mut group.players);
    }
    groups
}

/// Orders stat lines by position, ascending, with unpositioned players
/// last. Ties keep their input order.
#[must_use]
pub fn order_by_position(stats: &[PlayerStat]) -> Vec<&PlayerStat> {
    let mut ordered: Vec<&PlayerStat> = stats.iter().collect();
    sort_by_position(&mut ordered);
    ordered
}

fn sort_by_position(players: &mut [&PlayerStat]) {
    players.sort_by_key(|stat| (stat.position.is_none(), stat.position));
}
