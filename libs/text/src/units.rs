//! Physical unit names that follow numbers in materials-science abstracts.

use phf::phf_set;

/// Unit spellings as they appear after tokenization, including the Unicode
/// minus (`−`) used in exponents.
static UNITS: phf::Set<&'static str> = phf_set! {
    "K", "h", "V", "wt", "wt.", "MHz", "kHz", "GHz", "days", "weeks", "hours", "minutes",
    "seconds", "T", "MPa", "GPa", "at.", "mol.", "at", "m", "N", "s-1", "vol.", "vol", "eV",
    "A", "atm", "bar", "kOe", "Oe", "h.", "mWcm−2", "keV", "MeV", "meV", "day", "week",
    "hour", "minute", "month", "year", "cycles", "years", "fs", "ns", "ps",
    "rpm", "g", "mg", "mAcm−2", "mA", "mK", "mT", "dB", "Ag-1", "mAg-1", "mAg−1", "mAg",
    "mAh", "mAhg−1", "m-2", "mJ", "kJ", "m2g−1", "THz", "KHz", "kJmol−1", "Torr", "gL-1",
    "Vcm−1", "mVs−1", "J", "GJ", "mTorr", "cm2", "mbar", "kbar", "mmol", "mol", "molL−1",
    "MΩ", "Ω", "kΩ", "mΩ", "mgL−1", "moldm−3", "m2", "m3", "cm-1", "cm", "Scm−1", "Acm−1",
    "eV−1cm−2", "cm-2", "sccm", "cm−2eV−1", "cm−3eV−1", "kA", "s−1", "emu", "L", "cmHz1",
    "gmol−1", "kVcm−1", "MPam1", "cm2V−1s−1", "Acm−2", "cm−2s−1", "MV", "ionscm−2", "Jcm−2",
    "ncm−2", "Wcm−2", "GWcm−2", "Acm−2K−2", "gcm−3", "cm3g−1", "mgl−1", "mgml−1", "mgcm−2",
    "mΩcm", "cm−2", "ions", "moll−1", "nmol", "psi", "mol·L−1", "Jkg−1K−1", "km", "Wm−2",
    "mass", "mmHg", "mmmin−1", "GeV", "m−2", "m−2s−1", "Kmin−1", "gL−1", "ng", "hr", "w",
    "months", "mN", "kN", "Mrad", "rad", "arcsec", "Ag−1", "dpa", "cdm−2", "cd", "mcd",
    "mHz", "m−3", "ppm", "phr", "mL", "ML", "mlmin−1", "MWm−2", "Wm−1K−1", "kWh", "Wkg−1",
    "Jm−3", "m-3", "gl−1", "A−1", "Ks−1", "mgdm−3", "mms−1", "ks", "appm", "ºC", "HV",
    "kDa", "Da", "kG", "kGy", "MGy", "Gy", "mGy", "Gbps",
};

/// True when `token` is a known unit name. Matching is case-sensitive:
/// `K` is kelvin, `k` is not a unit.
pub fn is_unit(token: &str) -> bool {
    UNITS.contains(token)
}
