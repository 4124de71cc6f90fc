//! Periodic table symbol set
//!
//! The closed set of 118 element symbols, ordered by atomic number and
//! compiled into a perfect-hash set at build time.

use phf::phf_set;

static ELEMENTS: phf::Set<&'static str> = phf_set! {
    "H", "He", "Li", "Be", "B", "C",
    "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr",
    "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo",
    "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy",
    "Ho", "Er", "Tm", "Yb", "Lu", "Hf",
    "Ta", "W", "Re", "Os", "Ir", "Pt",
    "Au", "Hg", "Tl", "Pb", "Bi", "Po",
    "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No",
    "Lr", "Rf", "Db", "Sg", "Bh", "Hs",
    "Mt", "Ds", "Rg", "Cn", "Nh", "Fl",
    "Mc", "Lv", "Ts", "Og",
};

/// Returns true if `symbol` is one of the 118 element symbols (case-sensitive).
pub fn is_element(symbol: &str) -> bool {
    ELEMENTS.contains(symbol)
}

/// Returns the interned `'static` form of an element symbol.
pub fn lookup(symbol: &str) -> Option<&'static str> {
    ELEMENTS.get_key(symbol).copied()
}
