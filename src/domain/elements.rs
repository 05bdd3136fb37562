//! Element Definitions - the built-in element table
//!
//! Only the properties the editing tools care about live here: whether an element
//! occupies the energy layer, whether it conducts spark (used for aim previews),
//! and a display name. Physics properties belong to the simulation engine.

pub type ElementId = u8;
pub type ElementFlags = u8;

// Element IDs
pub const EL_NONE: ElementId = 0;
pub const EL_DUST: ElementId = 1;
pub const EL_WATR: ElementId = 2;
pub const EL_STNE: ElementId = 3;
pub const EL_METL: ElementId = 4;
pub const EL_PSCN: ElementId = 5;
pub const EL_NSCN: ElementId = 6;
pub const EL_INWR: ElementId = 7;
pub const EL_SPRK: ElementId = 8;
pub const EL_PHOT: ElementId = 9;
pub const EL_NEUT: ElementId = 10;
pub const EL_ELEC: ElementId = 11;
pub const EL_DRAY: ElementId = 12;
pub const EL_CRAY: ElementId = 13;
pub const EL_LDTC: ElementId = 14;
pub const EL_DTEC: ElementId = 15;
pub const EL_TSNS: ElementId = 16;
pub const EL_LSNS: ElementId = 17;
pub const EL_CONV: ElementId = 18;
pub const EL_FILT: ElementId = 19;
pub const EL_INSL: ElementId = 20;

pub const ELEMENT_COUNT: usize = 21;

// Flags (bitfield)
pub const FLAG_NONE: ElementFlags = 0;
pub const FLAG_ENERGY: ElementFlags = 1 << 0;      // Lives in the energy layer
pub const FLAG_CONDUCTIVE: ElementFlags = 1 << 1;  // Carries spark

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementProps {
    pub name: &'static str,
    pub color: u32,
    pub flags: ElementFlags,
}

impl ElementProps {
    #[inline]
    pub fn is_energy(&self) -> bool {
        self.flags & FLAG_ENERGY != 0
    }

    #[inline]
    pub fn is_conductive(&self) -> bool {
        self.flags & FLAG_CONDUCTIVE != 0
    }
}

const fn el(name: &'static str, color: u32, flags: ElementFlags) -> ElementProps {
    ElementProps { name, color, flags }
}

pub static ELEMENT_DATA: [ElementProps; ELEMENT_COUNT] = [
    el("NONE", 0xFF000000, FLAG_NONE),
    el("DUST", 0xFFA2E8FF, FLAG_NONE),
    el("WATR", 0xFFD03020, FLAG_NONE),
    el("STNE", 0xFFA0A0A0, FLAG_NONE),
    el("METL", 0xFFB09040, FLAG_CONDUCTIVE),
    el("PSCN", 0xFF405080, FLAG_CONDUCTIVE),
    el("NSCN", 0xFF804050, FLAG_CONDUCTIVE),
    el("INWR", 0xFF326454, FLAG_CONDUCTIVE),
    el("SPRK", 0xFF60FFFF, FLAG_NONE),
    el("PHOT", 0xFFFFFFFF, FLAG_ENERGY),
    el("NEUT", 0xFFFF3020, FLAG_ENERGY),
    el("ELEC", 0xFFFFE0DF, FLAG_ENERGY),
    el("DRAY", 0xFF66FFFF, FLAG_NONE),
    el("CRAY", 0xFF6B6BBB, FLAG_NONE),
    el("LDTC", 0xFF445566, FLAG_NONE),
    el("DTEC", 0xFF0B7AFD, FLAG_NONE),
    el("TSNS", 0xFF1F5DFD, FLAG_NONE),
    el("LSNS", 0xFF1F336E, FLAG_NONE),
    el("CONV", 0xFF1400FF, FLAG_NONE),
    el("FILT", 0xFFFFFF00, FLAG_NONE),
    el("INSL", 0xFF9EA3B6, FLAG_NONE),
];

#[inline]
pub fn is_valid_element_id(id: ElementId) -> bool {
    (id as usize) < ELEMENT_COUNT
}

#[inline]
pub fn is_particle(id: ElementId) -> bool {
    id != EL_NONE && is_valid_element_id(id)
}
