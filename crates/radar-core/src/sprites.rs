//! Radar sprite ids and the icon-id partition.
//!
//! Ids `0..=63` come from the game sprite atlas. Ids `64..=69` are the
//! supplementary icons loaded from their own textures.

use crate::constants::MAX_BLIP_ID;

pub const NONE: i32 = 0;
pub const WHITE: i32 = 1;
/// The player arrow.
pub const CENTRE: i32 = 2;
pub const MAP_HERE: i32 = 3;
pub const NORTH: i32 = 4;
pub const AIRYARD: i32 = 5;
pub const AMMUGUN: i32 = 6;
pub const BARBERS: i32 = 7;
pub const BIGSMOKE: i32 = 8;
pub const BOATYARD: i32 = 9;
pub const CATALINAPINK: i32 = 12;
pub const CESARVIAPANDO: i32 = 13;
pub const CJ: i32 = 15;
pub const CRASH1: i32 = 16;
pub const FIRE: i32 = 20;
pub const HOSPITAL: i32 = 22;
pub const MCSTRAP: i32 = 26;
pub const OGLOC: i32 = 28;
pub const PIZZA: i32 = 29;
pub const POLICE: i32 = 30;
pub const RACE: i32 = 33;
pub const RYDER: i32 = 34;
pub const QMARK: i32 = 37;
pub const SWEET: i32 = 38;
pub const THETRUTH: i32 = 40;
pub const WAYPOINT: i32 = 41;
pub const TORENORANCH: i32 = 42;
pub const WOOZIE: i32 = 46;
pub const ZERO: i32 = 47;
pub const DATEDISCO: i32 = 48;
pub const DATEDRINK: i32 = 49;
pub const GYM: i32 = 54;
/// Airstrip approach light.
pub const LIGHT: i32 = 56;
/// Airstrip runway.
pub const RUNWAY: i32 = 57;

// --- Supplementary icons ---

pub const MORE_ICON_STORE: i32 = 64;
pub const MORE_ICON_DONUTS: i32 = 65;
pub const MORE_ICON_INTRACK: i32 = 66;
pub const MORE_ICON_CASINO: i32 = 67;
pub const MORE_ICON_STRIP: i32 = 68;
pub const MORE_ICON_TRAIN: i32 = 69;

/// Number of supplementary icon textures.
pub const MORE_ICON_COUNT: usize = (MORE_ICON_TRAIN - MORE_ICON_STORE + 1) as usize;

/// Texture names of the supplementary icons, indexed by `id - MORE_ICON_STORE`.
pub const MORE_ICON_TEXTURES: [&str; MORE_ICON_COUNT] =
    ["store", "donuts", "intrack", "casino", "dateNude", "train"];

/// Which texture set an icon id is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource {
    /// Game sprite atlas slot.
    Atlas(usize),
    /// Supplementary icon slot.
    Extra(usize),
}

/// Dispatch an icon id onto its texture set. `None` for ids outside both ranges.
pub fn icon_source(id: i32) -> Option<IconSource> {
    if (MORE_ICON_STORE..=MORE_ICON_TRAIN).contains(&id) {
        Some(IconSource::Extra((id - MORE_ICON_STORE) as usize))
    } else if (0..=MAX_BLIP_ID).contains(&id) {
        Some(IconSource::Atlas(id as usize))
    } else {
        None
    }
}

/// Story-character sprites shown even though character traces are otherwise filtered.
pub fn is_legend(id: i32) -> bool {
    matches!(
        id,
        BIGSMOKE
            | CATALINAPINK
            | CESARVIAPANDO
            | CJ
            | CRASH1
            | MCSTRAP
            | OGLOC
            | RYDER
            | SWEET
            | THETRUTH
            | TORENORANCH
            | WOOZIE
            | ZERO
    )
}

/// Sprites used by coordinate/contact traces that act as mission checkpoints.
pub fn is_mission_checkpoint(id: i32) -> bool {
    matches!(id, NONE | QMARK)
}

/// Atlas texture name for a sprite id. Ids 0 and 1 have no texture.
pub fn atlas_texture_name(id: i32) -> Option<String> {
    if (2..=MAX_BLIP_ID).contains(&id) {
        Some(id.to_string())
    } else {
        None
    }
}

/// Alternate atlas name tried when the numbered texture is missing.
pub fn atlas_fallback_name(id: i32) -> Option<&'static str> {
    match id {
        DATEDISCO => Some("dateDisco"),
        DATEDRINK => Some("dateDrink"),
        _ => None,
    }
}
