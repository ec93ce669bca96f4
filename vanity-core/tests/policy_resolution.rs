//! End-to-end restriction resolution scenarios.

use std::collections::{BTreeMap, BTreeSet};

use vanity_core::policy::{
    AllowList, Blacklist, BlacklistConfig, GroupMembership, PlayerIdentity, Zone, merge,
    resolve_blacklist,
};

fn base() -> Blacklist {
    Blacklist {
        models: BTreeSet::from(["a_c_chimp".to_string()]),
        drawables: BTreeMap::from([("torso".to_string(), BTreeSet::from([12]))]),
        props: BTreeMap::new(),
    }
}

fn police_override() -> Blacklist {
    Blacklist {
        drawables: BTreeMap::from([("torso".to_string(), BTreeSet::from([55, 56]))]),
        ..Blacklist::default()
    }
}

fn ballas_override() -> Blacklist {
    Blacklist {
        props: BTreeMap::from([("hats".to_string(), BTreeSet::from([2]))]),
        ..Blacklist::default()
    }
}

fn config() -> BlacklistConfig {
    BlacklistConfig {
        base: base(),
        group_types: BTreeMap::from([
            (
                "jobs".to_string(),
                BTreeMap::from([("police".to_string(), police_override())]),
            ),
            (
                "gangs".to_string(),
                BTreeMap::from([("ballas".to_string(), ballas_override())]),
            ),
        ]),
        allow_list: AllowList::default(),
    }
}

fn player(job: &str, gang: &str) -> PlayerIdentity {
    PlayerIdentity {
        citizen_id: "CIT001".to_string(),
        job: GroupMembership {
            name: job.to_string(),
            ..GroupMembership::default()
        },
        gang: GroupMembership {
            name: gang.to_string(),
            ..GroupMembership::default()
        },
        ..PlayerIdentity::default()
    }
}

fn clothing_zone() -> Zone {
    Zone {
        kind: "clothing".to_string(),
        jobs: vec!["police".to_string()],
        gangs: Vec::new(),
    }
}

#[test]
fn civilian_collects_every_non_exempt_override() {
    let zone = clothing_zone();
    let effective = resolve_blacklist(&config(), Some(&zone), &player("civilian", "none"));

    let expected = merge(merge(base(), &police_override()), &ballas_override());
    assert_eq!(effective, expected);
    assert!(effective.blocks_drawable("torso", 12));
    assert!(effective.blocks_drawable("torso", 55));
    assert!(effective.blocks_prop("hats", 2));
}

#[test]
fn exempt_job_keeps_base_rules_for_that_kind() {
    let zone = clothing_zone();
    let effective = resolve_blacklist(&config(), Some(&zone), &player("police", "none"));

    // The job kind is skipped entirely; the gang override still lands
    // because the zone exempts no gangs.
    let expected = merge(base(), &ballas_override());
    assert_eq!(effective, expected);
    assert!(!effective.blocks_drawable("torso", 55));
}

#[test]
fn zoneless_resolution_is_the_base_set() {
    let effective = resolve_blacklist(&config(), None, &player("civilian", "none"));
    assert_eq!(effective, base());
}

#[test]
fn overrides_never_replace_unrelated_categories() {
    let zone = clothing_zone();
    let effective = resolve_blacklist(&config(), Some(&zone), &player("civilian", "none"));

    // Base model and drawable restrictions survive the gang's prop-only
    // override.
    assert!(effective.blocks_model("a_c_chimp"));
    assert!(effective.blocks_drawable("torso", 12));
}
