/// Hut block id to human-readable building type, as named in-game.
pub const BLOCK_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("blockhutfield", "Field"),
    ("blockhutplantationfield", "Plantation Field"),
    ("blockhutalchemist", "Alchemist Tower"),
    ("blockhutkitchen", "Cookery"),
    ("blockhutgraveyard", "Graveyard"),
    ("blockhutnetherworker", "Nether Mine"),
    ("blockhutarchery", "Archery"),
    ("blockhutbaker", "Bakery"),
    ("blockhutbarracks", "Barracks"),
    ("blockhutbarrackstower", "Barracks Tower"),
    ("blockhutbeekeeper", "Apiary"),
    ("blockhutblacksmith", "Blacksmith's Hut"),
    ("blockhutbuilder", "Builder's Hut"),
    ("blockhutchickenherder", "Chicken Farmer's Hut"),
    ("blockhutcitizen", "Residence"),
    ("blockhutcombatacademy", "Combat Academy"),
    ("blockhutcomposter", "Composter's Hut"),
    ("blockhutconcretemixer", "Concrete Mixer's Hut"),
    ("blockhutcook", "Restaurant"),
    ("blockhutcowboy", "Cowhand's Hut"),
    ("blockhutcrusher", "Crusher"),
    ("blockhutdeliveryman", "Courier's Hut"),
    ("blockhutdyer", "Dyer's Hut"),
    ("blockhutenchanter", "Enchanter's Tower"),
    ("blockhutfarmer", "Farm"),
    ("blockhutfisherman", "Fisher's Hut"),
    ("blockhutfletcher", "Fletcher's Hut"),
    ("blockhutflorist", "Flower Shop"),
    ("blockhutglassblower", "Glassblower's Hut"),
    ("blockhutguardtower", "Guard Tower"),
    ("blockhuthospital", "Hospital"),
    ("blockhutlibrary", "Library"),
    ("blockhutlumberjack", "Forester's Hut"),
    ("blockhutmechanic", "Mechanic's Hut"),
    ("blockhutminer", "Mine"),
    ("blockhutplantation", "Plantation"),
    ("blockhutrabbithutch", "Rabbit Hutch"),
    ("blockhutsawmill", "Sawmill"),
    ("blockhutschool", "School"),
    ("blockhutshepherd", "Shepherd's Hut"),
    ("blockhutsifter", "Sifter"),
    ("blockhutsmeltery", "Smeltery"),
    ("blockhutstonemason", "Stonemason's Hut"),
    ("blockhutstonesmeltery", "Stone Smeltery"),
    ("blockhutswineherder", "Swineherd's Hut"),
    ("blockhuttavern", "Tavern"),
    ("blockhuttownhall", "Town Hall"),
    ("blockhutuniversity", "University"),
    ("blockhutwarehouse", "Warehouse"),
    ("blockhutmysticalsite", "Mystical Site"),
];

pub fn block_display_name(block: &str) -> Option<&'static str> {
    BLOCK_DISPLAY_NAMES
        .iter()
        .find(|(id, _)| *id == block)
        .map(|(_, name)| *name)
}

/// Display name inferred from a building's hut blocks. First known block wins.
pub fn display_name_for(blocks: &[String]) -> Option<&'static str> {
    blocks.iter().find_map(|block| block_display_name(block))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_known_block_wins() {
        let blocks = vec![
            "blockhutunknown".to_string(),
            "blockhutbaker".to_string(),
            "blockhuttavern".to_string(),
        ];
        assert_eq!(display_name_for(&blocks), Some("Bakery"));
    }

    #[test]
    fn no_known_block_yields_none() {
        let blocks = vec!["blockhutnothing".to_string()];
        assert_eq!(display_name_for(&blocks), None);
        assert_eq!(display_name_for(&[]), None);
    }
}
