use crate::error::{BasisError, Result};
use phf::phf_map;
use serde::Serialize;
use std::fmt;

/// Chemical element with its standard atomic weight in g/mol. For elements without a
/// standard weight the mass number of the longest-lived isotope is used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    pub mass: f64,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}, Z = {})", self.name, self.symbol, self.atomic_number)
    }
}

/// Identifier of an element: symbol, name or atomic number.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementId {
    Symbol(String),
    Name(String),
    Number(u8),
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        let id: &str = id.trim();
        match id.parse::<u8>() {
            Ok(number) => ElementId::Number(number),
            Err(_) if id.chars().count() <= 3 => ElementId::Symbol(id.to_string()),
            Err(_) => ElementId::Name(id.to_string()),
        }
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        ElementId::from(id.as_str())
    }
}

impl From<u8> for ElementId {
    fn from(number: u8) -> Self {
        ElementId::Number(number)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ElementId::Symbol(symbol) => write!(f, "{}", symbol),
            ElementId::Name(name) => write!(f, "{}", name),
            ElementId::Number(number) => write!(f, "{}", number),
        }
    }
}

static SYMBOLS: phf::Map<&'static str, u8> = phf_map! {
    "h" => 1, "he" => 2, "li" => 3, "be" => 4, "b" => 5, "c" => 6, "n" => 7, "o" => 8,
    "f" => 9, "ne" => 10, "na" => 11, "mg" => 12, "al" => 13, "si" => 14, "p" => 15,
    "s" => 16, "cl" => 17, "ar" => 18, "k" => 19, "ca" => 20, "sc" => 21, "ti" => 22,
    "v" => 23, "cr" => 24, "mn" => 25, "fe" => 26, "co" => 27, "ni" => 28, "cu" => 29,
    "zn" => 30, "ga" => 31, "ge" => 32, "as" => 33, "se" => 34, "br" => 35, "kr" => 36,
    "rb" => 37, "sr" => 38, "y" => 39, "zr" => 40, "nb" => 41, "mo" => 42, "tc" => 43,
    "ru" => 44, "rh" => 45, "pd" => 46, "ag" => 47, "cd" => 48, "in" => 49, "sn" => 50,
    "sb" => 51, "te" => 52, "i" => 53, "xe" => 54, "cs" => 55, "ba" => 56, "la" => 57,
    "ce" => 58, "pr" => 59, "nd" => 60, "pm" => 61, "sm" => 62, "eu" => 63, "gd" => 64,
    "tb" => 65, "dy" => 66, "ho" => 67, "er" => 68, "tm" => 69, "yb" => 70, "lu" => 71,
    "hf" => 72, "ta" => 73, "w" => 74, "re" => 75, "os" => 76, "ir" => 77, "pt" => 78,
    "au" => 79, "hg" => 80, "tl" => 81, "pb" => 82, "bi" => 83, "po" => 84, "at" => 85,
    "rn" => 86, "fr" => 87, "ra" => 88, "ac" => 89, "th" => 90, "pa" => 91, "u" => 92,
    "np" => 93, "pu" => 94, "am" => 95, "cm" => 96, "bk" => 97, "cf" => 98, "es" => 99,
    "fm" => 100, "md" => 101, "no" => 102, "lr" => 103, "rf" => 104, "db" => 105,
    "sg" => 106, "bh" => 107, "hs" => 108, "mt" => 109, "ds" => 110, "rg" => 111,
    "cn" => 112, "nh" => 113, "fl" => 114, "mc" => 115, "lv" => 116, "ts" => 117,
    "og" => 118,
};

macro_rules! elements {
    ($(($z:expr, $symbol:expr, $name:expr, $mass:expr)),* $(,)?) => {
        [$(Element { atomic_number: $z, symbol: $symbol, name: $name, mass: $mass }),*]
    };
}

pub static ELEMENTS: [Element; 118] = elements![
    (1, "H", "Hydrogen", 1.008),
    (2, "He", "Helium", 4.002602),
    (3, "Li", "Lithium", 6.94),
    (4, "Be", "Beryllium", 9.0121831),
    (5, "B", "Boron", 10.81),
    (6, "C", "Carbon", 12.011),
    (7, "N", "Nitrogen", 14.007),
    (8, "O", "Oxygen", 15.999),
    (9, "F", "Fluorine", 18.998403163),
    (10, "Ne", "Neon", 20.1797),
    (11, "Na", "Sodium", 22.98976928),
    (12, "Mg", "Magnesium", 24.305),
    (13, "Al", "Aluminium", 26.9815385),
    (14, "Si", "Silicon", 28.085),
    (15, "P", "Phosphorus", 30.973761998),
    (16, "S", "Sulfur", 32.06),
    (17, "Cl", "Chlorine", 35.45),
    (18, "Ar", "Argon", 39.948),
    (19, "K", "Potassium", 39.0983),
    (20, "Ca", "Calcium", 40.078),
    (21, "Sc", "Scandium", 44.955908),
    (22, "Ti", "Titanium", 47.867),
    (23, "V", "Vanadium", 50.9415),
    (24, "Cr", "Chromium", 51.9961),
    (25, "Mn", "Manganese", 54.938044),
    (26, "Fe", "Iron", 55.845),
    (27, "Co", "Cobalt", 58.933194),
    (28, "Ni", "Nickel", 58.6934),
    (29, "Cu", "Copper", 63.546),
    (30, "Zn", "Zinc", 65.38),
    (31, "Ga", "Gallium", 69.723),
    (32, "Ge", "Germanium", 72.630),
    (33, "As", "Arsenic", 74.921595),
    (34, "Se", "Selenium", 78.971),
    (35, "Br", "Bromine", 79.904),
    (36, "Kr", "Krypton", 83.798),
    (37, "Rb", "Rubidium", 85.4678),
    (38, "Sr", "Strontium", 87.62),
    (39, "Y", "Yttrium", 88.90584),
    (40, "Zr", "Zirconium", 91.224),
    (41, "Nb", "Niobium", 92.90637),
    (42, "Mo", "Molybdenum", 95.95),
    (43, "Tc", "Technetium", 98.0),
    (44, "Ru", "Ruthenium", 101.07),
    (45, "Rh", "Rhodium", 102.90550),
    (46, "Pd", "Palladium", 106.42),
    (47, "Ag", "Silver", 107.8682),
    (48, "Cd", "Cadmium", 112.414),
    (49, "In", "Indium", 114.818),
    (50, "Sn", "Tin", 118.710),
    (51, "Sb", "Antimony", 121.760),
    (52, "Te", "Tellurium", 127.60),
    (53, "I", "Iodine", 126.90447),
    (54, "Xe", "Xenon", 131.293),
    (55, "Cs", "Caesium", 132.90545196),
    (56, "Ba", "Barium", 137.327),
    (57, "La", "Lanthanum", 138.90547),
    (58, "Ce", "Cerium", 140.116),
    (59, "Pr", "Praseodymium", 140.90766),
    (60, "Nd", "Neodymium", 144.242),
    (61, "Pm", "Promethium", 145.0),
    (62, "Sm", "Samarium", 150.36),
    (63, "Eu", "Europium", 151.964),
    (64, "Gd", "Gadolinium", 157.25),
    (65, "Tb", "Terbium", 158.92535),
    (66, "Dy", "Dysprosium", 162.500),
    (67, "Ho", "Holmium", 164.93033),
    (68, "Er", "Erbium", 167.259),
    (69, "Tm", "Thulium", 168.93422),
    (70, "Yb", "Ytterbium", 173.045),
    (71, "Lu", "Lutetium", 174.9668),
    (72, "Hf", "Hafnium", 178.49),
    (73, "Ta", "Tantalum", 180.94788),
    (74, "W", "Tungsten", 183.84),
    (75, "Re", "Rhenium", 186.207),
    (76, "Os", "Osmium", 190.23),
    (77, "Ir", "Iridium", 192.217),
    (78, "Pt", "Platinum", 195.084),
    (79, "Au", "Gold", 196.966569),
    (80, "Hg", "Mercury", 200.592),
    (81, "Tl", "Thallium", 204.38),
    (82, "Pb", "Lead", 207.2),
    (83, "Bi", "Bismuth", 208.98040),
    (84, "Po", "Polonium", 209.0),
    (85, "At", "Astatine", 210.0),
    (86, "Rn", "Radon", 222.0),
    (87, "Fr", "Francium", 223.0),
    (88, "Ra", "Radium", 226.0),
    (89, "Ac", "Actinium", 227.0),
    (90, "Th", "Thorium", 232.0377),
    (91, "Pa", "Protactinium", 231.03588),
    (92, "U", "Uranium", 238.02891),
    (93, "Np", "Neptunium", 237.0),
    (94, "Pu", "Plutonium", 244.0),
    (95, "Am", "Americium", 243.0),
    (96, "Cm", "Curium", 247.0),
    (97, "Bk", "Berkelium", 247.0),
    (98, "Cf", "Californium", 251.0),
    (99, "Es", "Einsteinium", 252.0),
    (100, "Fm", "Fermium", 257.0),
    (101, "Md", "Mendelevium", 258.0),
    (102, "No", "Nobelium", 259.0),
    (103, "Lr", "Lawrencium", 266.0),
    (104, "Rf", "Rutherfordium", 267.0),
    (105, "Db", "Dubnium", 268.0),
    (106, "Sg", "Seaborgium", 269.0),
    (107, "Bh", "Bohrium", 270.0),
    (108, "Hs", "Hassium", 277.0),
    (109, "Mt", "Meitnerium", 278.0),
    (110, "Ds", "Darmstadtium", 281.0),
    (111, "Rg", "Roentgenium", 282.0),
    (112, "Cn", "Copernicium", 285.0),
    (113, "Nh", "Nihonium", 286.0),
    (114, "Fl", "Flerovium", 289.0),
    (115, "Mc", "Moscovium", 290.0),
    (116, "Lv", "Livermorium", 293.0),
    (117, "Ts", "Tennessine", 294.0),
    (118, "Og", "Oganesson", 294.0),
];

fn by_number(number: u8) -> Option<&'static Element> {
    ELEMENTS.get((number as usize).checked_sub(1)?)
}

fn by_symbol(symbol: &str) -> Option<&'static Element> {
    SYMBOLS
        .get(symbol.to_lowercase().as_str())
        .and_then(|number| by_number(*number))
}

fn by_name(name: &str) -> Option<&'static Element> {
    let name: String = name.to_lowercase();
    ELEMENTS.iter().find(|el| el.name.to_lowercase() == name)
}

/// Look up an element by symbol, name or atomic number. Symbols and names are case
/// insensitive, a symbol that is not found is tried as name.
pub fn element<I: Into<ElementId>>(id: I) -> Result<&'static Element> {
    let id: ElementId = id.into();
    let found: Option<&'static Element> = match &id {
        ElementId::Symbol(symbol) => by_symbol(symbol).or_else(|| by_name(symbol)),
        ElementId::Name(name) => by_name(name),
        ElementId::Number(number) => by_number(*number),
    };
    found.ok_or_else(|| BasisError::NotFound(id.to_string()))
}

/// Batch lookup, the result is parallel to `ids`.
pub fn elements<I, T>(ids: I) -> Result<Vec<&'static Element>>
where
    I: IntoIterator<Item = T>,
    T: Into<ElementId>,
{
    ids.into_iter().map(element).collect()
}
