use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use gm_ledger::{ACTIONS, Campaign};
use gm_mechanics::Clock;

use super::{Context, print_json};

pub fn run(ctx: &Context, summary: bool) -> Result<(), String> {
    let handle = ctx.active()?;
    let campaign = handle.snapshot();
    if !summary {
        return print_json(&campaign);
    }

    println!("  {} [{}]", handle.name().bold(), campaign.crew.name.dimmed());
    println!(
        "  heat {}  wanted {}  rep {}  coin {}",
        campaign.heat, campaign.wanted, campaign.rep, campaign.coin
    );
    println!(
        "  crew: tier {} ({} hold), xp {}, advances {}",
        campaign.crew.tier, campaign.crew.hold, campaign.crew.xp, campaign.crew.advances
    );
    println!();

    print_players(&campaign);
    print_clocks(&campaign);

    if let Some(last) = &campaign.last_roll {
        let quality = last
            .quality
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {:?} by {}: {}",
            "Last roll".bold(),
            last.kind,
            last.actor.as_deref().unwrap_or("-"),
            quality.yellow()
        );
        for line in &last.consequences {
            println!("    - {line}");
        }
    }
    Ok(())
}

fn print_players(campaign: &Campaign) {
    if campaign.players.is_empty() {
        println!("  No players.");
        println!();
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Player", "Stress", "Trauma", "Harm", "XP", "Ratings"]);
    for (name, p) in &campaign.players {
        let ratings: Vec<String> = ACTIONS
            .iter()
            .filter_map(|a| p.rating(a).filter(|r| *r > 0).map(|r| format!("{a} {r}")))
            .collect();
        let trauma = if p.pending_trauma > 0 {
            format!("{} (+{} pending)", p.trauma.join(", "), p.pending_trauma)
        } else {
            p.trauma.join(", ")
        };
        table.add_row(vec![
            name.clone(),
            format!("{}/9", p.stress),
            trauma,
            p.harms.len().to_string(),
            format!("{} ({} adv)", p.xp, p.advances),
            ratings.join(", "),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_clocks(campaign: &Campaign) {
    let faction_clocks = campaign
        .factions
        .iter()
        .flat_map(|(name, f)| f.clocks.iter().map(move |c| (Some(name.as_str()), c)));
    let clocks: Vec<(Option<&str>, &Clock)> = campaign
        .clocks
        .iter()
        .map(|c| (None, c))
        .chain(faction_clocks)
        .collect();
    if clocks.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Clock", "Owner", "Progress"]);
    for (owner, clock) in clocks {
        let progress = format!("{}/{}", clock.filled, clock.segments);
        let progress = if clock.is_complete() {
            progress.red().to_string()
        } else {
            progress
        };
        table.add_row(vec![
            clock.name.clone(),
            owner.unwrap_or("campaign").to_string(),
            progress,
        ]);
    }
    println!("{table}");
    println!();
}
